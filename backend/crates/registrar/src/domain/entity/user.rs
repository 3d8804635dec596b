//! User Entity
//!
//! A registered student. Created once at registration and immutable
//! afterwards; there is no update or delete path.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{
    email::Email, matricule::Matricule, person_name::PersonName, phone::Phone,
};

/// User entity, as stored
///
/// `matricule` and `email` are each globally unique and both serve as
/// login identifiers. The password hash is produced only by
/// `platform::password` and never leaves the store layer in any other
/// form.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned numeric identifier
    pub user_id: UserId,
    /// Institutional student identifier
    pub matricule: Matricule,
    /// Given name
    pub name: PersonName,
    /// Family name
    pub last_name: PersonName,
    /// Contact email (lowercased)
    pub email: Email,
    /// Phone number (9 digits)
    pub phone: Phone,
    /// Argon2id digest in PHC format
    pub password_hash: HashedPassword,
    /// Assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full display name, as captured on submitted requests
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.as_str(), self.last_name.as_str())
    }
}

/// A user pending insertion
///
/// The store assigns `user_id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub matricule: Matricule,
    pub name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub phone: Phone,
    pub password_hash: HashedPassword,
}
