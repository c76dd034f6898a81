use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use tracing::{info, warn};

use postbox_db::Database;
use postbox_db::models::UserRow;
use postbox_types::api::{LoginParams, RegisterRequest, RegisterResponse, StatusMessage};

use crate::error::ApiError;
use crate::session::SessionCodec;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub sessions: SessionCodec,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Cheap early rejection; the insert below is still the authoritative check
    if state.db.get_user_by_username(&req.username)?.is_some() {
        return Err(ApiError::DuplicateUser);
    }

    // Argon2 is CPU-bound, keep it off the async workers
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    let created = state
        .db
        .create_user(&req.username, req.full_name.as_deref(), &password_hash)?;
    if !created {
        return Err(ApiError::DuplicateUser);
    }

    info!(username = %req.username, "User registered");

    Ok(Json(RegisterResponse {
        username: req.username,
        full_name: req.full_name,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || {
        authenticate(&db.db, &params.username, &params.password)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    let session = state.sessions.issue(&user.username)?;
    info!(username = %user.username, "Login successful");

    Ok((
        jar.add(state.sessions.cookie(session)),
        Json(StatusMessage::new("Login successful")),
    ))
}

/// Check a username/password pair against the user store.
/// Unknown users and wrong passwords are indistinguishable to the caller.
pub fn authenticate(db: &Database, username: &str, password: &str) -> Result<UserRow, ApiError> {
    let Some(user) = db.get_user_by_username(username)? else {
        warn!(username, "Login failed: unknown user");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(username, "Login failed: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(user)
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, password_hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("stored password hash is corrupt: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
