//! Value Object Module
//!
//! Pure validation types. No I/O: uniqueness checks belong to the use
//! case and the store, never here.

pub mod email;
pub mod matricule;
pub mod person_name;
pub mod phone;
pub mod request_fields;

pub use email::Email;
pub use matricule::Matricule;
pub use person_name::PersonName;
pub use phone::Phone;
pub use request_fields::{Comment, CourseCode, Cycle, Level};
