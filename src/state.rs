//! # Application State
//!
//! Shared, read-only state handed to the gate middleware and the handlers.
//! Axum clones it per request; everything heavy sits behind `Arc`.

use crate::config::Config;
use crate::error::{AppResult, ConfigError};
use crate::middleware::route::RouteMatcher;
use crate::middleware::session::SessionGate;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File served at the login path
pub const LOGIN_PAGE: &str = "login.html";

#[derive(Clone)]
pub struct AppState {
    /// Which paths are intercepted at all
    pub matcher: Arc<RouteMatcher>,

    /// Presence check for the session cookie
    pub gate: Arc<SessionGate>,

    /// Root of the built pages
    pub static_dir: PathBuf,
}

impl AppState {
    /// Build the state from configuration
    ///
    /// # Errors
    /// Fails when the static directory or its login page is missing, since
    /// every unauthenticated request would be redirected to a 404.
    pub fn new(config: &Config) -> AppResult<Self> {
        let static_dir = PathBuf::from(&config.static_dir);
        let login_page = static_dir.join(LOGIN_PAGE);
        if !login_page.is_file() {
            return Err(ConfigError::MissingFile(login_page.display().to_string()).into());
        }

        Ok(Self::with_rules(
            config.route_matcher(),
            SessionGate::new(&config.session_cookie, &config.login_path),
            static_dir,
        ))
    }

    pub fn with_rules(
        matcher: RouteMatcher,
        gate: SessionGate,
        static_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            matcher: Arc::new(matcher),
            gate: Arc::new(gate),
            static_dir: static_dir.as_ref().to_path_buf(),
        }
    }

    pub fn login_page(&self) -> PathBuf {
        self.static_dir.join(LOGIN_PAGE)
    }
}
