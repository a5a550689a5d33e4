//! # Session Handlers
//!
//! API endpoints around the session cookie. They live under `/api`, which
//! the route matcher excludes, so they answer with or without a session.
//!
//! ## What these handlers do not do
//! Issuing the session cookie belongs to the login action, and validating a
//! token belongs to the business actions behind the gate. These handlers
//! only look at whether the cookie is there, and can expire it.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_cookies::{Cookie, Cookies};

/// Response body for `GET /api/auth/session`
///
/// Only carries a flag. The token is never sent back, so a page script
/// cannot read it from here even when the cookie is `HttpOnly`.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// Report whether the request carries a session cookie
///
/// ## Route
/// GET /api/auth/session
///
/// ## Response
/// ```json
/// { "authenticated": true }
/// ```
///
/// Uses the same presence test as the gate (`SessionGate::has_session`), so
/// an empty or quoted-empty value reports `false`. A forged value reports
/// `true`: this is presence, not validity.
pub async fn session_info(State(state): State<AppState>, cookies: Cookies) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: state.gate.has_session(&cookies),
    })
}

/// Expire the session cookie
///
/// ## Route
/// POST /api/auth/logout
///
/// ## Response
/// ```json
/// { "success": true, "message": "Logged out successfully" }
/// ```
///
/// ## How it works
/// The removal cookie is built on path `/` so it replaces the cookie the
/// login action set for the whole site. `tower-cookies` only emits the
/// `Set-Cookie` removal when the request actually carried the cookie; a
/// logout without one is a no-op that still answers `success`.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Json<Value> {
    let removal = Cookie::build((state.gate.cookie_name().to_string(), ""))
        .path("/")
        .build();
    cookies.remove(removal);

    tracing::debug!("Session cookie cleared");

    Json(json!({
        "success": true,
        "message": "Logged out successfully"
    }))
}

/// Fallback for unknown `/api` routes
///
/// Uses `OriginalUri` because the nested router only sees the path with
/// the `/api` prefix stripped. Answers `404` with `{ "error": "..." }`.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("no API route for {}", uri.path()))
}
