//! # Gate Middleware
//!
//! Wires the route matcher and the session gate into the axum request
//! pipeline. Runs once per request, before routing picks a handler.
//!
//! ## Request flow
//! 1. Excluded path (per `RouteMatcher`): forward untouched, gate not run
//! 2. `SessionGate::evaluate` says `Continue`: forward untouched
//! 3. `SessionGate::evaluate` says `RedirectTo`: answer `307` and stop
//!
//! The middleware never fails. A missing cookie is the handled case and
//! becomes a redirect, not an error response.

use crate::middleware::session::GateDecision;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

/// Gate every intercepted request on the session cookie
///
/// Mounted with `axum::middleware::from_fn_with_state`, with `AppState`
/// supplying the matcher and the gate.
///
/// ## Layer order
/// Must sit inside a `CookieManagerLayer`: the `Cookies` extractor reads
/// the jar that layer parses from the `Cookie` header.
///
/// ## Redirects
/// `307 Temporary Redirect` to the login path with an empty body. The
/// original path and query are dropped, so there is no return-to state.
/// Redirects are logged at `debug` with the path; cookie values are never
/// logged.
pub async fn require_session(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if !state.matcher.intercepts(path) {
        return next.run(request).await;
    }

    match state.gate.evaluate(path, &cookies) {
        GateDecision::Continue => next.run(request).await,
        GateDecision::RedirectTo(target) => {
            tracing::debug!("No session cookie for {}, redirecting to {}", path, target);
            Redirect::temporary(&target).into_response()
        }
    }
}
