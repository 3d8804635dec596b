//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::RegistrarAppState;
pub use router::{registrar_router, registrar_router_generic};
