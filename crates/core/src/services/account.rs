//! Account service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use carelink_common::{AppError, AppResult};
use carelink_db::{
    entities::{user_account, user_profile},
    repositories::UserRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Account service for user registration and credential checks.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAccountInput {
    /// Display name.
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Login email, unique across all accounts.
    #[validate(email)]
    pub email: String,

    /// Plaintext password; stored only as an argon2 hash.
    #[validate(length(min = 1, max = 128))]
    pub password: String,

    /// Role profile the account belongs to.
    pub profile_id: i32,

    /// Contact phone number.
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    /// Age in years.
    #[validate(range(min = 0, max = 150))]
    pub age: i32,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Register a new account.
    pub async fn register(&self, input: RegisterAccountInput) -> AppResult<user_account::Model> {
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "email {} already registered",
                input.email
            )));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user_account::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(password_hash),
            profile_id: Set(input.profile_id),
            phone_number: Set(input.phone_number),
            age: Set(input.age),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        self.user_repo.create(model).await
    }

    /// Check email/password credentials, returning the account on success.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<user_account::Model> {
        let account = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::BadRequest("invalid email or password".to_string()))?;

        if !account.is_active || !verify_password(password, &account.password_hash)? {
            return Err(AppError::BadRequest(
                "invalid email or password".to_string(),
            ));
        }

        Ok(account)
    }

    /// Create a role profile.
    pub async fn create_profile(
        &self,
        name: &str,
        description: &str,
    ) -> AppResult<user_profile::Model> {
        let model = user_profile::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };
        self.user_repo.create_profile(model).await
    }
}

/// Hash a password using Argon2.
pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
