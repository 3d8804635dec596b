//! HTTP Handlers
//!
//! Thin orchestration: extract, call the use case, answer with a
//! redirect or JSON. Failures convert through `RegistrarError`'s
//! `IntoResponse`, so no handler builds error bodies by hand.

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect};
use std::sync::Arc;

use crate::application::{
    AuthenticateUseCase, ListRequestsUseCase, RegisterInput, RegisterUseCase, SignInInput,
    SignInUseCase, SubmitRequestInput, SubmitRequestUseCase,
};
use crate::application::config::RegistrarConfig;
use crate::domain::repository::{RequestRepository, UserRepository};
use crate::error::RegistrarResult;
use crate::presentation::dto::{
    DashboardView, LoginForm, RegisterForm, RequestView, SubmitRequestForm,
};

/// Shared state for registrar handlers
#[derive(Clone)]
pub struct RegistrarAppState<R>
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<RegistrarConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<RegistrarAppState<R>>,
    Form(form): Form<RegisterForm>,
) -> RegistrarResult<Redirect>
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let input = RegisterInput {
        matricule: form.matricule,
        name: form.name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
        password: form.password,
    };

    use_case.execute(input).await?;

    Ok(Redirect::to("/login"))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<RegistrarAppState<R>>,
    Form(form): Form<LoginForm>,
) -> RegistrarResult<impl IntoResponse>
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        login: form.login,
        password: form.password,
    };

    let output = use_case.execute(input).await?;

    let cookie = state.config.session_cookie().build_set_cookie(&output.token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to("/dashboard"),
    ))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /dashboard
pub async fn dashboard<R>(
    State(state): State<RegistrarAppState<R>>,
    headers: HeaderMap,
) -> RegistrarResult<Json<DashboardView>>
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let claims = AuthenticateUseCase::new(state.config.clone()).execute(&headers)?;

    Ok(Json(DashboardView::from(claims)))
}

// ============================================================================
// Submit Request
// ============================================================================

/// POST /submit-request
pub async fn submit_request<R>(
    State(state): State<RegistrarAppState<R>>,
    headers: HeaderMap,
    Form(form): Form<SubmitRequestForm>,
) -> RegistrarResult<Redirect>
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let claims = AuthenticateUseCase::new(state.config.clone()).execute(&headers)?;

    let use_case = SubmitRequestUseCase::new(state.repo.clone());

    let input = SubmitRequestInput {
        cycle: form.cycle,
        level: form.level,
        nom_code_ue: form.nom_code_ue,
        note_exam: form.note_exam,
        note_cc: form.note_cc,
        note_tp: form.note_tp,
        note_tpe: form.note_tpe,
        autre: form.autre,
        comment: form.comment,
        just_p: form.just_p,
    };

    use_case.execute(&claims, input).await?;

    Ok(Redirect::to("/my-requests"))
}

// ============================================================================
// My Requests
// ============================================================================

/// GET /my-requests
pub async fn my_requests<R>(
    State(state): State<RegistrarAppState<R>>,
    headers: HeaderMap,
) -> RegistrarResult<Json<Vec<RequestView>>>
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let claims = AuthenticateUseCase::new(state.config.clone()).execute(&headers)?;

    let requests = ListRequestsUseCase::new(state.repo.clone())
        .execute(&claims)
        .await?;

    Ok(Json(requests.into_iter().map(RequestView::from).collect()))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
///
/// The token is stateless, so there is nothing to revoke server-side;
/// clearing the cookie ends the session.
pub async fn logout<R>(State(state): State<RegistrarAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + RequestRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.session_cookie().build_delete_cookie();

    ([(header::SET_COOKIE, cookie)], Redirect::to("/"))
}
