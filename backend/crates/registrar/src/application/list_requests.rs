//! List My Requests Use Case
//!
//! Returns the authenticated student's requests, newest first. Scoping
//! to the caller happens here; the repository query filters on the
//! claims' user id and nothing else.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::token::SessionClaims;
use crate::domain::entity::correction_request::CorrectionRequest;
use crate::domain::repository::RequestRepository;
use crate::error::RegistrarResult;

/// List requests use case
pub struct ListRequestsUseCase<R>
where
    R: RequestRepository,
{
    request_repo: Arc<R>,
}

impl<R> ListRequestsUseCase<R>
where
    R: RequestRepository,
{
    pub fn new(request_repo: Arc<R>) -> Self {
        Self { request_repo }
    }

    pub async fn execute(&self, claims: &SessionClaims) -> RegistrarResult<Vec<CorrectionRequest>> {
        self.request_repo
            .list_for_user(UserId::from_i64(claims.user_id))
            .await
    }
}
