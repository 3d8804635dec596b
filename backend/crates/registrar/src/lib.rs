//! Registrar Backend Module
//!
//! Grade-correction request handling for the university registrar:
//! students register, sign in, and file requests about missing grade
//! components, which are stored and listed per student.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, session token codec, configuration
//! - `infra/` - PostgreSQL implementation + connection retry
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, salted per hash
//! - Stateless sessions: HMAC-SHA256-signed claims in an HttpOnly cookie
//! - Registration and login failures never reveal which identity field
//!   conflicted or whether an account exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::RegistrarConfig;
pub use application::token::{SessionClaims, SessionTokenCodec};
pub use error::{FieldViolation, RegistrarError, RegistrarResult};
pub use infra::postgres::{DatabaseConfig, PgRegistrarRepository, connect_with_retry};
pub use presentation::router::registrar_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
