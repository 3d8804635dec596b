//! Register Use Case
//!
//! Creates a new student account. No auto-login: the caller is
//! redirected to the login form afterwards.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Matricule, PersonName, Phone};
use crate::error::{RegistrarError, RegistrarResult, collect_field};

/// Register input (raw form fields)
pub struct RegisterInput {
    pub matricule: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> RegistrarResult<()> {
        let (fields, password) = validate(input)?;

        // Optimization only: the unique constraints on matricule/email
        // remain the authoritative guard at insert time.
        if self
            .user_repo
            .identity_exists(&fields.matricule, &fields.email)
            .await?
        {
            return Err(RegistrarError::DuplicateIdentity);
        }

        let password_hash = password
            .hash()
            .map_err(|e| RegistrarError::Internal(e.to_string()))?;

        let user = NewUser {
            matricule: fields.matricule,
            name: fields.name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            password_hash,
        };

        let user_id = self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(())
    }
}

struct ValidatedRegistration {
    matricule: Matricule,
    name: PersonName,
    last_name: PersonName,
    email: Email,
    phone: Phone,
}

/// Validate every field, reporting all violations together.
/// No store access happens until this has passed.
fn validate(input: RegisterInput) -> RegistrarResult<(ValidatedRegistration, ClearTextPassword)> {
    let mut violations = Vec::new();

    let matricule = collect_field(&mut violations, "matricule", Matricule::new(&input.matricule));
    let name = collect_field(&mut violations, "name", PersonName::new(&input.name));
    let last_name = collect_field(
        &mut violations,
        "last_name",
        PersonName::new(&input.last_name),
    );
    let email = collect_field(&mut violations, "email", Email::new(&input.email));
    let phone = collect_field(&mut violations, "phone", Phone::new(&input.phone));
    let password = collect_field(
        &mut violations,
        "password",
        ClearTextPassword::new(input.password),
    );

    match (matricule, name, last_name, email, phone, password) {
        (Some(matricule), Some(name), Some(last_name), Some(email), Some(phone), Some(password)) => {
            Ok((
                ValidatedRegistration {
                    matricule,
                    name,
                    last_name,
                    email,
                    phone,
                },
                password,
            ))
        }
        _ => Err(RegistrarError::Validation(violations)),
    }
}
