use std::sync::LazyLock;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::DatabaseConnection;

use crate::{
    auth::SessionUser,
    dto::{EMAIL_MAX_CHARS, NAME_MAX_CHARS, auth::RegisterRequest, check_length},
    error::{AppError, AppResult},
    models::User,
    services::user_service::{self, NewUser},
};

pub const DEFAULT_ROLE: &str = "user";

/// Verified against when the email is unknown, so every rejected login pays for one argon2 check.
static UNKNOWN_USER_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("unknown-user-placeholder").ok());

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!(error = %err, "stored password hash is not parsable");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Check the registration form and normalise it.
pub fn validate_registration(payload: RegisterRequest) -> AppResult<RegisterRequest> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if name.chars().count() < 2 {
        return Err(AppError::BadRequest(
            "Name must be at least 2 characters long".into(),
        ));
    }
    check_length("Name", &name, NAME_MAX_CHARS)?;

    let email = payload.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }
    if !valid_email(&email) {
        return Err(AppError::BadRequest("Invalid email format".into()));
    }
    check_length("Email", &email, EMAIL_MAX_CHARS)?;

    if payload.password.chars().count() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters long".into(),
        ));
    }

    Ok(RegisterRequest {
        name,
        email,
        password: payload.password,
    })
}

pub async fn register(db: &DatabaseConnection, payload: RegisterRequest) -> AppResult<User> {
    let RegisterRequest {
        name,
        email,
        password,
    } = validate_registration(payload)?;

    let password_hash = hash_password(&password)?;
    let user = user_service::create_user(
        db,
        NewUser {
            email,
            password_hash,
            name,
            role: DEFAULT_ROLE.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(user)
}

/// Resolve credentials to a session identity.
///
/// Unknown email and wrong password both return `None`.
pub async fn authorize(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> AppResult<Option<SessionUser>> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Ok(None);
    }

    let Some(user) = user_service::get_user_by_email(db, email).await? else {
        if let Some(hash) = UNKNOWN_USER_HASH.as_deref() {
            let _ = verify_password(password, hash);
        }
        tracing::warn!("login rejected");
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash) {
        tracing::warn!(user_id = user.id, "login rejected");
        return Ok(None);
    }

    Ok(Some(SessionUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}
