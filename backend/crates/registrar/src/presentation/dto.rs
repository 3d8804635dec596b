//! Form payloads and response DTOs
//!
//! Form bodies arrive as `application/x-www-form-urlencoded`. Unknown
//! fields are ignored, so a body that echoes identity fields
//! (`all_name`, `matricule`) has no effect: those always come from the
//! session claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::token::SessionClaims;
use crate::domain::entity::correction_request::CorrectionRequest;

/// HTML checkboxes submit "on" (or any value) when ticked and nothing
/// at all otherwise; map presence to true.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value.as_deref() {
        None | Some("") | Some("0") | Some("off") | Some("false") => false,
        Some(_) => true,
    })
}

// ============================================================================
// Register
// ============================================================================

/// Registration form
#[derive(Clone, Deserialize)]
pub struct RegisterForm {
    pub matricule: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login form
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    /// Matricule or email
    pub login: String,
    pub password: String,
}

// ============================================================================
// Submit Request
// ============================================================================

/// Grade-correction request form
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequestForm {
    pub cycle: String,
    pub level: i64,
    pub nom_code_ue: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub note_exam: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub note_cc: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub note_tp: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub note_tpe: bool,
    #[serde(default, deserialize_with = "checkbox")]
    pub autre: bool,
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub just_p: bool,
}

// ============================================================================
// Views
// ============================================================================

/// Claims view for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub matricule: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl From<SessionClaims> for DashboardView {
    fn from(claims: SessionClaims) -> Self {
        Self {
            matricule: claims.matricule,
            name: claims.name,
            last_name: claims.last_name,
            email: claims.email,
        }
    }
}

/// Stored request, as listed back to its owner
#[derive(Debug, Clone, Serialize)]
pub struct RequestView {
    pub request_id: i64,
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
    pub created_at: DateTime<Utc>,
}

impl From<CorrectionRequest> for RequestView {
    fn from(request: CorrectionRequest) -> Self {
        Self {
            request_id: request.request_id.as_i64(),
            all_name: request.all_name,
            matricule: request.matricule,
            cycle: request.cycle,
            level: request.level,
            nom_code_ue: request.nom_code_ue,
            note_exam: request.note_exam,
            note_cc: request.note_cc,
            note_tp: request.note_tp,
            note_tpe: request.note_tpe,
            autre: request.autre,
            comment: request.comment,
            just_p: request.just_p,
            created_at: request.created_at,
        }
    }
}
