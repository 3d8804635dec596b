//! Grade-Correction Request Entity
//!
//! A claim filed by a student about missing grade components.
//! Read-only after creation; listed newest-first per owner.

use chrono::{DateTime, Utc};
use kernel::id::{RequestId, UserId};

/// Stored grade-correction request
///
/// `all_name` and `matricule` are denormalized from the session claims
/// at submission time and never re-derived from the users table.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionRequest {
    pub request_id: RequestId,
    /// Owning user (always an existing User)
    pub user_id: UserId,
    /// Full name snapshot from the claims
    pub all_name: String,
    /// Matricule snapshot from the claims
    pub matricule: String,
    /// Academic cycle label (Licence, Master, ...)
    pub cycle: String,
    /// Numeric level within the cycle
    pub level: i16,
    /// Course name / code (UE)
    pub nom_code_ue: String,
    /// Missing exam mark
    pub note_exam: bool,
    /// Missing continuous-assessment mark
    pub note_cc: bool,
    /// Missing practical-work mark
    pub note_tp: bool,
    /// Missing personal-work mark
    pub note_tpe: bool,
    /// Some other issue
    pub autre: bool,
    /// Free-text comment
    pub comment: Option<String>,
    /// Justification document still pending
    pub just_p: bool,
    /// Assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

/// A request pending insertion
///
/// The store assigns `request_id` and `created_at`. Identity fields
/// come from the authenticated session claims, never from the client
/// form body.
#[derive(Debug, Clone)]
pub struct NewCorrectionRequest {
    pub user_id: UserId,
    pub all_name: String,
    pub matricule: String,
    pub cycle: String,
    pub level: i16,
    pub nom_code_ue: String,
    pub note_exam: bool,
    pub note_cc: bool,
    pub note_tp: bool,
    pub note_tpe: bool,
    pub autre: bool,
    pub comment: Option<String>,
    pub just_p: bool,
}
