//! Account registration, login and cookie sessions.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::{MessageResponse, UserResponse, UserType};
use crate::session::Session;
use crate::AppState;

use super::error::ApiError;
use super::extract::JsonBody;
use super::validation::{validate_login, validate_registration};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

lazy_static! {
    /// Verified against when no account matches, so both failures cost one hash
    static ref DUMMY_PASSWORD_HASH: String =
        hash_password("handyfix-unused-password").unwrap_or_default();
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// A request carrying a live session cookie
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub session: Session,
}

impl AuthSession {
    pub fn user_id(&self) -> crate::db::Id {
        self.session.user_id
    }

    /// Require the session's user to have the given role
    pub fn require(&self, user_type: UserType) -> Result<(), ApiError> {
        if self.session.user_type != user_type {
            return Err(ApiError::forbidden("Access denied"));
        }
        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.auth.cookie_name)
            .map(|c| c.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("Unauthorized. Please log in."))?;

        let session = state
            .sessions
            .get(&token)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized. Please log in."))?;

        Ok(AuthSession { token, session })
    }
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let max_age = time::Duration::seconds(state.config.session_ttl().num_seconds());
    Cookie::build((state.config.auth.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.secure_cookies())
        .max_age(max_age)
        .build()
}

fn removal_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build(state.config.auth.cookie_name.clone())
        .path("/")
        .build()
}

/// Register a new account
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let request = validate_registration(&body)?;

    if state.storage.get_user_by_username(&request.username).is_some() {
        return Err(ApiError::conflict("Username already taken"));
    }
    if state.storage.get_user_by_email(&request.email).is_some() {
        return Err(ApiError::conflict("Email already in use"));
    }

    let password_hash = hash_password(&request.password).map_err(ApiError::internal)?;
    let user = state
        .storage
        .create_user(request.into_new_user(password_hash))?;

    info!(user_id = user.id, user_type = %user.user_type, "Registered user {}", user.username);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonBody(body): JsonBody,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    // Malformed credentials, unknown email and wrong password answer identically
    let request =
        validate_login(&body).map_err(|_| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let user = state.storage.get_user_by_email(&request.email);
    let hash = user
        .as_ref()
        .map_or(DUMMY_PASSWORD_HASH.as_str(), |user| user.password.as_str());
    let verified = verify_password(&request.password, hash);

    let user = user.filter(|_| verified).ok_or_else(|| {
        debug!("Rejected login attempt");
        ApiError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let token = state.sessions.start(&user, state.config.session_ttl());
    info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(&state, token));
    Ok((jar, Json(UserResponse::from(user))))
}

/// End the current session, if any
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    if let Some(cookie) = jar.get(&state.config.auth.cookie_name) {
        if state.sessions.destroy(cookie.value()) {
            debug!("Session destroyed");
        }
    }

    let jar = jar.remove(removal_cookie(&state));
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Current user for the session
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
) -> Result<Json<UserResponse>, ApiError> {
    match state.storage.get_user(auth.user_id()) {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => {
            state.sessions.destroy(&auth.token);
            Err(ApiError::not_found("User not found"))
        }
    }
}
