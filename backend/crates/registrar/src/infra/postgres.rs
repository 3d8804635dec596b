//! PostgreSQL Repository Implementation
//!
//! All statements are parameterized; caller-supplied values never reach
//! statement text. Connections come from the pool per statement and are
//! released on every exit path, including errors.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use kernel::id::{RequestId, UserId};
use platform::password::HashedPassword;

use crate::domain::entity::{
    correction_request::{CorrectionRequest, NewCorrectionRequest},
    user::{NewUser, User},
};
use crate::domain::repository::{RequestRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, matricule::Matricule, person_name::PersonName, phone::Phone,
};
use crate::error::{RegistrarError, RegistrarResult};

// ============================================================================
// Connection
// ============================================================================

/// Connection parameters, sourced from the process environment at
/// startup
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// Connection attempts before giving up
const MAX_CONNECT_ATTEMPTS: u32 = 3;

/// Backoff unit; attempt N sleeps N of these
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Open a pool, retrying transient failures with increasing backoff.
///
/// Non-transient failures (bad credentials 28P01, unknown database
/// 3D000) fail immediately. Exhaustion surfaces `StoreUnavailable`.
pub async fn connect_with_retry(config: &DatabaseConfig) -> RegistrarResult<PgPool> {
    for attempt in 1..=MAX_CONNECT_ATTEMPTS {
        tracing::info!(
            attempt,
            max_attempts = MAX_CONNECT_ATTEMPTS,
            "Connecting to database"
        );

        match try_connect(config).await {
            Ok(pool) => {
                tracing::info!("Database connection established");
                return Ok(pool);
            }
            Err(e) if is_transient(&e) && attempt < MAX_CONNECT_ATTEMPTS => {
                let delay = RETRY_BASE_DELAY * attempt;
                tracing::warn!(
                    error = %e,
                    delay_secs = delay.as_secs(),
                    "Transient connection failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed");
                return Err(RegistrarError::StoreUnavailable);
            }
        }
    }

    Err(RegistrarError::StoreUnavailable)
}

async fn try_connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(config.connect_options())
        .await?;

    // Ping before handing the pool out
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Worth retrying: refused/reset connections, pool exhaustion, and
/// Postgres classes 53 (insufficient resources) / 57P03 (starting up)
fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => matches!(
            db.code().as_deref(),
            Some("53000") | Some("53300") | Some("57P03")
        ),
        _ => false,
    }
}

/// Unique-constraint rejections become `DuplicateIdentity`; this is the
/// authoritative guard against concurrent registrations that both pass
/// the pre-check.
fn map_unique_violation(err: sqlx::Error) -> RegistrarError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some("23505") {
            return RegistrarError::DuplicateIdentity;
        }
    }
    RegistrarError::Database(err)
}

// ============================================================================
// Repository
// ============================================================================

/// PostgreSQL-backed registrar repository
#[derive(Clone)]
pub struct PgRegistrarRepository {
    pool: PgPool,
}

impl PgRegistrarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgRegistrarRepository {
    async fn create(&self, user: &NewUser) -> RegistrarResult<UserId> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (matricule, name, last_name, email, phone, password)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id
            "#,
        )
        .bind(user.matricule.as_str())
        .bind(user.name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(UserId::from_i64(user_id))
    }

    async fn find_by_identifier(&self, identifier: &str) -> RegistrarResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                matricule,
                name,
                last_name,
                email,
                phone,
                password,
                created_at
            FROM users
            WHERE matricule = $1 OR email = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn identity_exists(
        &self,
        matricule: &Matricule,
        email: &Email,
    ) -> RegistrarResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE matricule = $1 OR email = $2)",
        )
        .bind(matricule.as_str())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

impl RequestRepository for PgRegistrarRepository {
    async fn create(&self, request: &NewCorrectionRequest) -> RegistrarResult<RequestId> {
        let request_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO requests (
                user_id,
                all_name,
                matricule,
                cycle,
                level,
                nom_code_ue,
                note_exam,
                note_cc,
                note_tp,
                note_tpe,
                autre,
                comment,
                just_p
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING request_id
            "#,
        )
        .bind(request.user_id.as_i64())
        .bind(&request.all_name)
        .bind(&request.matricule)
        .bind(&request.cycle)
        .bind(request.level)
        .bind(&request.nom_code_ue)
        .bind(request.note_exam)
        .bind(request.note_cc)
        .bind(request.note_tp)
        .bind(request.note_tpe)
        .bind(request.autre)
        .bind(&request.comment)
        .bind(request.just_p)
        .fetch_one(&self.pool)
        .await?;

        Ok(RequestId::from_i64(request_id))
    }

    async fn list_for_user(&self, user_id: UserId) -> RegistrarResult<Vec<CorrectionRequest>> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT
                request_id,
                user_id,
                all_name,
                matricule,
                cycle,
                level,
                nom_code_ue,
                note_exam,
                note_cc,
                note_tp,
                note_tpe,
                autre,
                comment,
                just_p,
                created_at
            FROM requests
            WHERE user_id = $1
            ORDER BY created_at DESC, request_id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RequestRow::into_request).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    matricule: String,
    name: String,
    last_name: String,
    email: String,
    phone: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> RegistrarResult<User> {
        // Stored digests were produced by the hasher; a malformed one
        // means the row was written outside this application.
        let password_hash = HashedPassword::from_phc_string(self.password)
            .map_err(|_| RegistrarError::Internal("Invalid password hash in store".to_string()))?;

        Ok(User {
            user_id: UserId::from_i64(self.user_id),
            matricule: Matricule::from_db(self.matricule),
            name: PersonName::from_db(self.name),
            last_name: PersonName::from_db(self.last_name),
            email: Email::from_db(self.email),
            phone: Phone::from_db(self.phone),
            password_hash,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RequestRow {
    request_id: i64,
    user_id: i64,
    all_name: String,
    matricule: String,
    cycle: String,
    level: i16,
    nom_code_ue: String,
    note_exam: bool,
    note_cc: bool,
    note_tp: bool,
    note_tpe: bool,
    autre: bool,
    comment: Option<String>,
    just_p: bool,
    created_at: DateTime<Utc>,
}

impl RequestRow {
    fn into_request(self) -> CorrectionRequest {
        CorrectionRequest {
            request_id: RequestId::from_i64(self.request_id),
            user_id: UserId::from_i64(self.user_id),
            all_name: self.all_name,
            matricule: self.matricule,
            cycle: self.cycle,
            level: self.level,
            nom_code_ue: self.nom_code_ue,
            note_exam: self.note_exam,
            note_cc: self.note_cc,
            note_tp: self.note_tp,
            note_tpe: self.note_tpe,
            autre: self.autre,
            comment: self.comment,
            just_p: self.just_p,
            created_at: self.created_at,
        }
    }
}
