//! HTTP routing.
//!
//! Assembles the service router: the `/api` endpoints, the public login
//! page, and the static pages, all wrapped in the session gate.

use crate::handlers::auth::{api_not_found, logout, session_info};
use crate::handlers::health::health_check;
use crate::middleware::auth::require_session;
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// # Registered Endpoints
/// - `GET /api/health` - Liveness probe
/// - `GET /api/auth/session` - Whether the session cookie is present
/// - `POST /api/auth/logout` - Expire the session cookie
/// - `GET <login path>` - Login page, public
/// - everything else - static pages, gated on the session cookie
///
/// Layers run outside-in: tracing, cookie parsing, then the gate. The gate
/// therefore sees every request before routing, including paths that end in
/// the static fallback.
pub fn routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/auth/session", get(session_info))
        .route("/auth/logout", post(logout))
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api)
        .route_service(state.gate.login_path(), ServeFile::new(state.login_page()))
        .fallback_service(ServeDir::new(&state.static_dir))
        .layer(from_fn_with_state(state.clone(), require_session))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::middleware::route::RouteMatcher;
    use crate::middleware::session::SessionGate;
    use axum::{
        body::Body,
        extract::Request,
        http::{self, header, Method, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn static_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
    }

    fn app() -> Router {
        routes(AppState::with_rules(
            RouteMatcher::default(),
            SessionGate::default(),
            static_dir(),
        ))
    }

    fn request(method: Method, path: &str, cookie: Option<&str>) -> Request {
        let mut builder = http::Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn login_page_is_public() {
        let response = app()
            .oneshot(request(Method::GET, "/login", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("<form"));
    }

    #[tokio::test]
    async fn index_requires_session() {
        let response = app()
            .oneshot(request(Method::GET, "/", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn index_served_with_session() {
        let response = app()
            .oneshot(request(Method::GET, "/", Some("facturado_session_id=abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.contains("/settings/users"));
    }

    #[tokio::test]
    async fn missing_page_behind_gate_is_not_found() {
        let response = app()
            .oneshot(request(Method::GET, "/clients", Some("facturado_session_id=abc123")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_needs_no_session() {
        let response = app()
            .oneshot(request(Method::GET, "/api/health", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn session_status_reflects_cookie_presence() {
        for (cookie, expected) in [
            (None, false),
            (Some("facturado_session_id="), false),
            (Some("facturado_session_id=\"\""), false),
            (Some("facturado_session_id=abc123"), true),
        ] {
            let response = app()
                .oneshot(request(Method::GET, "/api/auth/session", cookie))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["authenticated"], expected, "{cookie:?}");
            assert!(body.get("token").is_none());
        }
    }

    #[tokio::test]
    async fn logout_expires_session_cookie() {
        let response = app()
            .oneshot(request(
                Method::POST,
                "/api/auth/logout",
                Some("facturado_session_id=abc123"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.starts_with("facturado_session_id="));
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(set_cookie.contains("Path=/"));
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn unknown_api_route_is_json_not_found() {
        let response = app()
            .oneshot(request(Method::GET, "/api/invoices/7", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["error"],
            "Not found: no API route for /api/invoices/7"
        );
    }

    #[test]
    fn state_requires_login_page() {
        let config = Config::from_lookup(|key| match key {
            "STATIC_DIR" => Some("/nonexistent/facturado".to_string()),
            _ => None,
        })
        .unwrap();

        assert!(AppState::new(&config).is_err());
    }

    #[test]
    fn state_builds_from_shipped_pages() {
        let dir = static_dir();
        let config = Config::from_lookup(|key| match key {
            "STATIC_DIR" => Some(dir.display().to_string()),
            _ => None,
        })
        .unwrap();

        let state = AppState::new(&config).unwrap();
        assert_eq!(state.gate.login_path(), "/login");
        assert!(state.login_page().is_file());
    }
}
