//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer; uniqueness of matricule/email is ultimately
//! enforced by the store's constraints, not here.

use crate::domain::entity::{
    correction_request::{CorrectionRequest, NewCorrectionRequest},
    user::{NewUser, User},
};
use crate::domain::value_object::{email::Email, matricule::Matricule};
use crate::error::RegistrarResult;
use kernel::id::{RequestId, UserId};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user, returning the store-assigned id.
    ///
    /// A unique-constraint rejection maps to `DuplicateIdentity`; the
    /// pre-check in the register use case is an optimization only.
    async fn create(&self, user: &NewUser) -> RegistrarResult<UserId>;

    /// Find a user whose matricule OR email equals `identifier`
    async fn find_by_identifier(&self, identifier: &str) -> RegistrarResult<Option<User>>;

    /// Check whether the matricule or the email is already registered
    async fn identity_exists(
        &self,
        matricule: &Matricule,
        email: &Email,
    ) -> RegistrarResult<bool>;
}

/// Grade-correction request repository trait
#[trait_variant::make(RequestRepository: Send)]
pub trait LocalRequestRepository {
    /// Insert a new request, returning the store-assigned id
    async fn create(&self, request: &NewCorrectionRequest) -> RegistrarResult<RequestId>;

    /// All requests owned by `user_id`, newest first
    async fn list_for_user(&self, user_id: UserId) -> RegistrarResult<Vec<CorrectionRequest>>;
}
