//! # Configuration Management
//!
//! Configuration comes from the environment (and a `.env` file during local
//! development). Everything has a default, so a bare `cargo run` serves the
//! `static` directory on `127.0.0.1:3000` behind the session gate.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 3000)
//! - `STATIC_DIR`: Directory holding the built pages (default: static)
//! - `SESSION_COOKIE`: Name of the session cookie (default: facturado_session_id)
//! - `LOGIN_PATH`: Public login path, also the redirect target (default: /login)
//! - `GATE_EXCLUDED_PREFIXES`: Comma-separated path prefixes never intercepted
//! - `GATE_EXCLUDED_PATHS`: Comma-separated exact paths never intercepted

use crate::error::ConfigError;
use crate::middleware::route::{RouteMatcher, DEFAULT_EXCLUDED_PATHS, DEFAULT_EXCLUDED_PREFIXES};
use crate::middleware::session::{DEFAULT_LOGIN_PATH, DEFAULT_SESSION_COOKIE};
use std::env;

/// Application configuration
///
/// Holds every value needed to build the router and bind the listener.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    pub port: u16,

    /// Directory the fallback file service reads from
    pub static_dir: String,

    /// Cookie whose presence lets a request past the gate
    pub session_cookie: String,

    /// Public path, and where unauthenticated requests are sent
    pub login_path: String,

    /// Segment-aligned prefixes excluded from interception
    pub excluded_prefixes: Vec<String>,

    /// Exact paths excluded from interception
    pub excluded_paths: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` first if present (a missing file is not an error), then
    /// reads each variable and validates it.
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=0.0.0.0
    /// PORT=3000
    /// STATIC_DIR=dist
    /// SESSION_COOKIE=facturado_session_id
    /// LOGIN_PATH=/login
    /// GATE_EXCLUDED_PREFIXES=/api,/_next/static,/_next/image
    /// GATE_EXCLUDED_PATHS=/favicon.ico
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a closure over a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
                var: "PORT".to_string(),
                reason: format!("'{}' is not a valid port number", raw),
            })?,
            None => 3000,
        };

        let session_cookie =
            lookup("SESSION_COOKIE").unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());
        if !is_cookie_token(&session_cookie) {
            return Err(ConfigError::InvalidEnvValue {
                var: "SESSION_COOKIE".to_string(),
                reason: format!("'{}' is not a valid cookie name", session_cookie),
            });
        }

        let login_path = lookup("LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        require_absolute("LOGIN_PATH", &login_path)?;
        require_literal("LOGIN_PATH", &login_path)?;

        let excluded_prefixes = match lookup("GATE_EXCLUDED_PREFIXES") {
            Some(raw) => split_list(&raw),
            None => DEFAULT_EXCLUDED_PREFIXES.iter().map(|p| p.to_string()).collect(),
        };
        let excluded_paths = match lookup("GATE_EXCLUDED_PATHS") {
            Some(raw) => split_list(&raw),
            None => DEFAULT_EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
        };
        for entry in &excluded_prefixes {
            require_absolute("GATE_EXCLUDED_PREFIXES", entry)?;
        }
        for entry in &excluded_paths {
            require_absolute("GATE_EXCLUDED_PATHS", entry)?;
        }

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            session_cookie,
            login_path,
            excluded_prefixes,
            excluded_paths,
        })
    }

    /// Get the socket address to bind the server to, e.g. "127.0.0.1:3000"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route matcher built from the configured exclusions
    pub fn route_matcher(&self) -> RouteMatcher {
        RouteMatcher::new(self.excluded_prefixes.clone(), self.excluded_paths.clone())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn require_absolute(var: &str, path: &str) -> Result<(), ConfigError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("'{}' must start with '/'", path),
        })
    }
}

// The login path is mounted as an axum route; captures and wildcards would
// match paths the classifier treats as protected.
fn require_literal(var: &str, path: &str) -> Result<(), ConfigError> {
    match path.chars().find(|c| matches!(c, '{' | '}' | ':' | '*')) {
        Some(c) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("'{}' must be a literal path, found '{}'", path, c),
        }),
        None => Ok(()),
    }
}

// RFC 6265 cookie-name: a non-empty RFC 2616 token.
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
