//! Unit tests for the registrar use cases
//!
//! The use cases run against an in-memory repository that mirrors the
//! store's contract, including its unique constraints on matricule and
//! email.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use kernel::id::{RequestId, UserId};

use crate::application::config::RegistrarConfig;
use crate::application::{
    ListRequestsUseCase, RegisterInput, RegisterUseCase, SessionClaims, SignInInput, SignInUseCase,
    SubmitRequestInput, SubmitRequestUseCase,
};
use crate::domain::entity::correction_request::{CorrectionRequest, NewCorrectionRequest};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{RequestRepository, UserRepository};
use crate::domain::value_object::{Email, Matricule};
use crate::error::{RegistrarError, RegistrarResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct InMemoryRepository {
    users: Mutex<Vec<User>>,
    requests: Mutex<Vec<CorrectionRequest>>,
    /// Counts every store-facing call, so tests can assert that
    /// validation failures never reach the store
    store_calls: AtomicUsize,
}

impl InMemoryRepository {
    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap()
    }

    fn store_call_count(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }
}

impl UserRepository for InMemoryRepository {
    async fn create(&self, user: &NewUser) -> RegistrarResult<UserId> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();

        // The store's unique constraints are the authoritative guard
        if users
            .iter()
            .any(|u| u.matricule == user.matricule || u.email == user.email)
        {
            return Err(RegistrarError::DuplicateIdentity);
        }

        let user_id = UserId::from_i64(users.len() as i64 + 1);
        let created_at = Self::base_time() + Duration::seconds(users.len() as i64);

        users.push(User {
            user_id,
            matricule: user.matricule.clone(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
            created_at,
        });

        Ok(user_id)
    }

    async fn find_by_identifier(&self, identifier: &str) -> RegistrarResult<Option<User>> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();

        Ok(users
            .iter()
            .find(|u| u.matricule.as_str() == identifier || u.email.as_str() == identifier)
            .cloned())
    }

    async fn identity_exists(
        &self,
        matricule: &Matricule,
        email: &Email,
    ) -> RegistrarResult<bool> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();

        Ok(users
            .iter()
            .any(|u| u.matricule == *matricule || u.email == *email))
    }
}

impl RequestRepository for InMemoryRepository {
    async fn create(&self, request: &NewCorrectionRequest) -> RegistrarResult<RequestId> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let mut requests = self.requests.lock().unwrap();

        let request_id = RequestId::from_i64(requests.len() as i64 + 1);
        let created_at = Self::base_time() + Duration::seconds(requests.len() as i64);

        requests.push(CorrectionRequest {
            request_id,
            user_id: request.user_id,
            all_name: request.all_name.clone(),
            matricule: request.matricule.clone(),
            cycle: request.cycle.clone(),
            level: request.level,
            nom_code_ue: request.nom_code_ue.clone(),
            note_exam: request.note_exam,
            note_cc: request.note_cc,
            note_tp: request.note_tp,
            note_tpe: request.note_tpe,
            autre: request.autre,
            comment: request.comment.clone(),
            just_p: request.just_p,
            created_at,
        });

        Ok(request_id)
    }

    async fn list_for_user(&self, user_id: UserId) -> RegistrarResult<Vec<CorrectionRequest>> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let requests = self.requests.lock().unwrap();

        let mut rows: Vec<CorrectionRequest> = requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.request_id.as_i64().cmp(&a.request_id.as_i64()))
        });

        Ok(rows)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> Arc<RegistrarConfig> {
    Arc::new(RegistrarConfig::new([7u8; 32]))
}

fn register_input(matricule: &str, email: &str) -> RegisterInput {
    RegisterInput {
        matricule: matricule.to_string(),
        name: "Ana".to_string(),
        last_name: "Lee".to_string(),
        email: email.to_string(),
        phone: "612345678".to_string(),
        password: "secret1".to_string(),
    }
}

fn submit_input() -> SubmitRequestInput {
    SubmitRequestInput {
        cycle: "L3".to_string(),
        level: 3,
        nom_code_ue: "CS301".to_string(),
        note_exam: true,
        note_cc: false,
        note_tp: false,
        note_tpe: false,
        autre: false,
        comment: Some("missing grade".to_string()),
        just_p: false,
    }
}

async fn register(repo: &Arc<InMemoryRepository>, matricule: &str, email: &str) {
    RegisterUseCase::new(repo.clone())
        .execute(register_input(matricule, email))
        .await
        .expect("registration should succeed");
}

// ============================================================================
// Register
// ============================================================================

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_login_by_either_identifier() {
        let repo = Arc::new(InMemoryRepository::default());
        register(&repo, "A123", "a@x.edu").await;

        let sign_in = SignInUseCase::new(repo.clone(), config());

        let by_matricule = sign_in
            .execute(SignInInput {
                login: "A123".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(by_matricule.claims.matricule, "A123");

        let by_email = sign_in
            .execute(SignInInput {
                login: "a@x.edu".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(by_email.claims.email, "a@x.edu");
    }

    #[tokio::test]
    async fn test_duplicate_matricule_rejected() {
        let repo = Arc::new(InMemoryRepository::default());
        register(&repo, "A123", "a@x.edu").await;

        let result = RegisterUseCase::new(repo.clone())
            .execute(register_input("A123", "other@x.edu"))
            .await;

        assert!(matches!(result, Err(RegistrarError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = Arc::new(InMemoryRepository::default());
        register(&repo, "A123", "a@x.edu").await;

        let result = RegisterUseCase::new(repo.clone())
            .execute(register_input("B456", "a@x.edu"))
            .await;

        assert!(matches!(result, Err(RegistrarError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_invalid_phone_never_reaches_store() {
        let repo = Arc::new(InMemoryRepository::default());

        let mut input = register_input("A123", "a@x.edu");
        input.phone = "61234567".to_string(); // 8 digits

        let result = RegisterUseCase::new(repo.clone()).execute(input).await;

        match result {
            Err(RegistrarError::Validation(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "phone");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(repo.store_call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_violations_reported_together() {
        let repo = Arc::new(InMemoryRepository::default());

        let mut input = register_input("A123", "not-an-email");
        input.phone = "abc".to_string();

        let result = RegisterUseCase::new(repo.clone()).execute(input).await;

        match result {
            Err(RegistrarError::Validation(violations)) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
                assert_eq!(fields, vec!["email", "phone"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

mod sign_in_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_indistinguishable() {
        let repo = Arc::new(InMemoryRepository::default());
        register(&repo, "A123", "a@x.edu").await;

        let sign_in = SignInUseCase::new(repo.clone(), config());

        let unknown = sign_in
            .execute(SignInInput {
                login: "NOBODY".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        let wrong_password = sign_in
            .execute(SignInInput {
                login: "A123".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(unknown, Err(RegistrarError::InvalidCredentials)));
        assert!(matches!(
            wrong_password,
            Err(RegistrarError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_issued_token_decodes_to_claims() {
        let repo = Arc::new(InMemoryRepository::default());
        register(&repo, "A123", "a@x.edu").await;

        let config = config();
        let output = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                login: "A123".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        let decoded = config.codec().decode(&output.token).unwrap();
        assert_eq!(decoded, output.claims);
        assert_eq!(decoded.full_name(), "Ana Lee");
    }
}

// ============================================================================
// Submit & List
// ============================================================================

mod request_tests {
    use super::*;

    fn claims_for(user_id: i64, matricule: &str) -> SessionClaims {
        SessionClaims {
            user_id,
            matricule: matricule.to_string(),
            name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            email: "a@x.edu".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submitted_request_carries_claims_identity() {
        let repo = Arc::new(InMemoryRepository::default());
        let claims = claims_for(1, "A123");

        SubmitRequestUseCase::new(repo.clone())
            .execute(&claims, submit_input())
            .await
            .unwrap();

        let stored = repo.requests.lock().unwrap()[0].clone();
        assert_eq!(stored.all_name, "Ana Lee");
        assert_eq!(stored.matricule, "A123");
        assert_eq!(stored.user_id, UserId::from_i64(1));
    }

    #[tokio::test]
    async fn test_level_out_of_range_rejected() {
        let repo = Arc::new(InMemoryRepository::default());
        let claims = claims_for(1, "A123");

        let mut input = submit_input();
        input.level = 40000;

        let result = SubmitRequestUseCase::new(repo.clone())
            .execute(&claims, input)
            .await;

        match result {
            Err(RegistrarError::Validation(violations)) => {
                assert_eq!(violations[0].field, "level");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(repo.store_call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_composed_name_rejected() {
        let repo = Arc::new(InMemoryRepository::default());

        // Each part is a valid name on its own; together they exceed
        // the 255-char snapshot bound.
        let mut claims = claims_for(1, "A123");
        claims.name = "A".repeat(200);
        claims.last_name = "B".repeat(200);

        let result = SubmitRequestUseCase::new(repo.clone())
            .execute(&claims, submit_input())
            .await;

        match result {
            Err(RegistrarError::Validation(violations)) => {
                assert_eq!(violations[0].field, "all_name");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(repo.store_call_count(), 0);
    }

    #[tokio::test]
    async fn test_listing_is_scoped_and_newest_first() {
        let repo = Arc::new(InMemoryRepository::default());
        let ana = claims_for(1, "A123");
        let sam = claims_for(2, "B456");

        let submit = SubmitRequestUseCase::new(repo.clone());

        let mut first = submit_input();
        first.nom_code_ue = "CS101".to_string();
        submit.execute(&ana, first).await.unwrap();

        submit.execute(&sam, submit_input()).await.unwrap();

        let mut last = submit_input();
        last.nom_code_ue = "CS301".to_string();
        submit.execute(&ana, last).await.unwrap();

        let listed = ListRequestsUseCase::new(repo.clone())
            .execute(&ana)
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| r.user_id == UserId::from_i64(1)));
        // Newest first
        assert_eq!(listed[0].nom_code_ue, "CS301");
        assert_eq!(listed[1].nom_code_ue, "CS101");
    }

    #[tokio::test]
    async fn test_full_scenario() {
        let repo = Arc::new(InMemoryRepository::default());
        register(&repo, "A123", "a@x.edu").await;

        let config = config();
        let signed_in = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                login: "A123".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        let claims = config.codec().decode(&signed_in.token).unwrap();

        SubmitRequestUseCase::new(repo.clone())
            .execute(&claims, submit_input())
            .await
            .unwrap();

        let listed = ListRequestsUseCase::new(repo.clone())
            .execute(&claims)
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        let row = &listed[0];
        assert_eq!(row.all_name, "Ana Lee");
        assert_eq!(row.matricule, "A123");
        assert_eq!(row.cycle, "L3");
        assert_eq!(row.level, 3);
        assert_eq!(row.nom_code_ue, "CS301");
        assert!(row.note_exam);
        assert!(!row.note_cc);
        assert_eq!(row.comment.as_deref(), Some("missing grade"));
    }
}
