//! # Facturado Gate
//!
//! Entry point for the session-gated front of the Facturado invoicing
//! application. Every page request must carry the session cookie or it is
//! redirected to the login page; API routes and built assets bypass the
//! gate.
//!
//! ## Request lifecycle
//! - **Route matcher**: excluded paths (`/api`, `/_next/static`,
//!   `/_next/image`, `/favicon.ico`) skip the gate entirely
//! - **Path classifier**: the login path is public
//! - **Session gate**: everything else needs `facturado_session_id`

mod config;      // Environment configuration
mod error;       // Error types and HTTP error responses
mod handlers;    // API handlers (health, session status, logout)
mod middleware;  // Route matcher, path classifier, session gate
mod router;      // Router assembly
mod state;       // Shared application state

use crate::config::Config;
use crate::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Builds the route rules and shared state
/// 4. Starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info for dependencies, debug for this crate; RUST_LOG overrides.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,facturado_gate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config)?;
    tracing::info!(
        "Session gate ready: cookie '{}', login path '{}'",
        app_state.gate.cookie_name(),
        app_state.gate.login_path()
    );

    let app = router::routes(app_state);

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
