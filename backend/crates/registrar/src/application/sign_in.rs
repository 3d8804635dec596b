//! Sign In Use Case
//!
//! Authenticates a student by matricule or email and mints a signed
//! session token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::RegistrarConfig;
use crate::application::token::SessionClaims;
use crate::domain::repository::UserRepository;
use crate::error::{RegistrarError, RegistrarResult};

/// Sign in input
pub struct SignInInput {
    /// Matricule or email
    pub login: String,
    /// Password
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed token for the session cookie
    pub token: String,
    /// The claims embedded in the token
    pub claims: SessionClaims,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<RegistrarConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<RegistrarConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Unknown identifier and wrong password both fail with the same
    /// `InvalidCredentials`; the caller cannot tell which it was.
    pub async fn execute(&self, input: SignInInput) -> RegistrarResult<SignInOutput> {
        let identifier = input.login.trim();

        let user = self
            .user_repo
            .find_by_identifier(identifier)
            .await?
            .ok_or(RegistrarError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|_| RegistrarError::InvalidCredentials)?;

        if !user.password_hash.verify(&password) {
            return Err(RegistrarError::InvalidCredentials);
        }

        let claims = SessionClaims::from_user(&user);
        let token = self.config.codec().encode(&claims);

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { token, claims })
    }
}
