//! Account and session endpoints
//!
//! Sessions ride an HttpOnly cookie. Registration and login both issue a
//! fresh session; logout revokes it. Login failures deliberately return
//! the same message for unknown email and wrong password.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use tassel_common::api::auth;
use tassel_common::api::types::ProfileUpdate;
use tassel_common::db::models::User;
use tassel_common::db::users;

use crate::{ApiError, ApiResult, AppState};

/// Session cookie name
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub major: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/register
///
/// Creates an account and logs it in immediately (201 + session cookie).
/// Duplicate email is a 409.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(email), Some(password), Some(name)) = (
        non_empty(req.email),
        non_empty(req.password),
        non_empty(req.name),
    ) else {
        return Err(ApiError::Validation(
            "Email, password, and name are required".to_string(),
        ));
    };

    let user = users::create_user(
        &state.db,
        &email,
        &password,
        &name,
        req.major.as_deref(),
        req.year,
    )
    .await?;

    let token = auth::create_session(&state.db, &user.user_id, state.session_timeout_secs).await?;
    tracing::info!(user_id = %user.user_id, "Account registered");

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token, state.session_timeout_secs))],
        Json(json!({ "user": user })),
    ))
}

/// POST /api/auth/login
///
/// Verifies credentials and issues a session cookie. Unknown email and
/// wrong password are indistinguishable to the caller (401).
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (non_empty(req.email), non_empty(req.password)) else {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let user = users::find_user_by_email(&state.db, &email)
        .await?
        .filter(|user| auth::verify_password(&password, &user.password_salt, &user.password_hash))
        .ok_or_else(|| ApiError::Auth("Invalid email or password".to_string()))?;

    let token = auth::create_session(&state.db, &user.user_id, state.session_timeout_secs).await?;
    tracing::info!(user_id = %user.user_id, "Login");

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, state.session_timeout_secs))],
        Json(json!({ "user": user })),
    ))
}

/// POST /api/auth/logout
///
/// Revokes the current session (if any) and clears the cookie. Always
/// succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(token) = session_token(&headers) {
        auth::delete_session(&state.db, &token).await?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "success": true })),
    ))
}

/// PATCH /api/auth/profile
///
/// Partial profile update for the logged-in account.
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(updates): Json<ProfileUpdate>,
) -> ApiResult<Json<serde_json::Value>> {
    let user = current_user(&state, &headers).await?;

    users::update_profile(&state.db, &user.user_id, &updates).await?;

    Ok(Json(json!({ "success": true })))
}

/// Resolve the request's session cookie to a user, or fail with 401
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> ApiResult<User> {
    let token = session_token(headers)
        .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

    auth::load_session_user(&state.db, &token)
        .await?
        .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))
}

/// Extract the session token from the Cookie header(s)
fn session_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token, max_age_secs
    )
}

fn clear_session_cookie() -> String {
    format!("{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE)
}

/// Missing and empty string fields are treated the same
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Build auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/profile", patch(update_profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark; session=abc123; other=1".parse().unwrap());
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_missing_or_empty_session_cookie() {
        let headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "session=".parse().unwrap());
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", 604800);
        assert!(cookie.starts_with("session=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));

        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
