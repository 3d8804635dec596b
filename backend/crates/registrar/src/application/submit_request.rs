//! Submit Request Use Case
//!
//! Files a grade-correction request for the authenticated student.

use std::sync::Arc;

use kernel::id::{RequestId, UserId};

use crate::application::token::SessionClaims;
use crate::domain::entity::correction_request::NewCorrectionRequest;
use crate::domain::repository::RequestRepository;
use crate::domain::value_object::{Comment, CourseCode, Cycle, Level, PersonName};
use crate::error::{RegistrarError, RegistrarResult, collect_field};

/// Submit request input (raw form fields)
///
/// Carries no identity fields: `all_name` and `matricule` always come
/// from the verified session claims, so a student cannot file under
/// another identity.
pub struct SubmitRequestInput {
    pub cycle: String,
    pub level: i64,
    pub nom_code_ue: String,
    pub note_exam: bool,
    pub note_cc: bool,
    pub note_tp: bool,
    pub note_tpe: bool,
    pub autre: bool,
    pub comment: Option<String>,
    pub just_p: bool,
}

/// Submit request use case
pub struct SubmitRequestUseCase<R>
where
    R: RequestRepository,
{
    request_repo: Arc<R>,
}

impl<R> SubmitRequestUseCase<R>
where
    R: RequestRepository,
{
    pub fn new(request_repo: Arc<R>) -> Self {
        Self { request_repo }
    }

    pub async fn execute(
        &self,
        claims: &SessionClaims,
        input: SubmitRequestInput,
    ) -> RegistrarResult<RequestId> {
        let mut violations = Vec::new();

        let cycle = collect_field(&mut violations, "cycle", Cycle::new(&input.cycle));
        let level = collect_field(&mut violations, "level", Level::new(input.level));
        let nom_code_ue = collect_field(
            &mut violations,
            "nom_code_ue",
            CourseCode::new(&input.nom_code_ue),
        );
        let comment = collect_field(
            &mut violations,
            "comment",
            Comment::new(input.comment.as_deref()),
        );
        // The stored snapshot column bounds the composed name at 255;
        // two near-limit claim parts can exceed it together.
        let all_name = collect_field(
            &mut violations,
            "all_name",
            PersonName::new(claims.full_name()),
        );

        let (Some(cycle), Some(level), Some(nom_code_ue), Some(comment), Some(all_name)) =
            (cycle, level, nom_code_ue, comment, all_name)
        else {
            return Err(RegistrarError::Validation(violations));
        };

        let request = NewCorrectionRequest {
            user_id: UserId::from_i64(claims.user_id),
            all_name: all_name.into_inner(),
            matricule: claims.matricule.clone(),
            cycle: cycle.into_inner(),
            level: level.value(),
            nom_code_ue: nom_code_ue.into_inner(),
            note_exam: input.note_exam,
            note_cc: input.note_cc,
            note_tp: input.note_tp,
            note_tpe: input.note_tpe,
            autre: input.autre,
            comment: comment.into_inner(),
            just_p: input.just_p,
        };

        let request_id = self.request_repo.create(&request).await?;

        tracing::info!(
            user_id = claims.user_id,
            request_id = %request_id,
            "Grade-correction request submitted"
        );

        Ok(request_id)
    }
}
