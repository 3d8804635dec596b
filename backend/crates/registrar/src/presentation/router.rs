//! Registrar Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::RegistrarConfig;
use crate::domain::repository::{RequestRepository, UserRepository};
use crate::infra::postgres::PgRegistrarRepository;
use crate::presentation::handlers::{self, RegistrarAppState};

/// Create the registrar router with the PostgreSQL repository
pub fn registrar_router(repo: PgRegistrarRepository, config: RegistrarConfig) -> Router {
    registrar_router_generic(repo, config)
}

/// Create a registrar router for any repository implementation
pub fn registrar_router_generic<R>(repo: R, config: RegistrarConfig) -> Router
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let state = RegistrarAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/dashboard", get(handlers::dashboard::<R>))
        .route("/submit-request", post(handlers::submit_request::<R>))
        .route("/my-requests", get(handlers::my_requests::<R>))
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}
