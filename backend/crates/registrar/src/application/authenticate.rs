//! Authenticate Use Case
//!
//! Precondition for protected operations: reads the session cookie and
//! verifies its signature. Purely computational: the stateless token
//! design needs no store round-trip here.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::application::config::RegistrarConfig;
use crate::application::token::SessionClaims;
use crate::error::{RegistrarError, RegistrarResult};

/// Authenticate use case
pub struct AuthenticateUseCase {
    config: Arc<RegistrarConfig>,
}

impl AuthenticateUseCase {
    pub fn new(config: Arc<RegistrarConfig>) -> Self {
        Self { config }
    }

    /// Yield the caller's claims, or `Unauthenticated` if the cookie is
    /// absent, unsigned, or tampered with. The boundary layer turns
    /// `Unauthenticated` into a redirect to the login page.
    pub fn execute(&self, headers: &HeaderMap) -> RegistrarResult<SessionClaims> {
        let token = platform::cookie::extract_cookie(headers, &self.config.session_cookie_name)
            .ok_or(RegistrarError::Unauthenticated)?;

        self.config
            .codec()
            .decode(&token)
            .ok_or(RegistrarError::Unauthenticated)
    }
}
