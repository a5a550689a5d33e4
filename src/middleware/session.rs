//! # Session Gate
//!
//! Decides whether an intercepted request may continue. The check is a
//! presence test on the session cookie: the value is never decoded,
//! verified or looked up. Handlers behind the gate own real authorization.
//!
//! The gate is a pure function of `(path, cookies)`, so it needs no running
//! server to test.

use super::route::{PathClassifier, PathKind};
use std::collections::HashMap;
use tower_cookies::Cookies;

/// Cookie carrying the opaque session token
pub const DEFAULT_SESSION_COOKIE: &str = "facturado_session_id";

/// Public path and redirect target for unauthenticated requests
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Read access to a request's cookies by name
pub trait CookieLookup {
    fn cookie_value(&self, name: &str) -> Option<String>;
}

impl CookieLookup for HashMap<String, String> {
    fn cookie_value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl CookieLookup for Cookies {
    fn cookie_value(&self, name: &str) -> Option<String> {
        self.get(name).map(|cookie| cookie.value().to_string())
    }
}

/// What the middleware does with the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward the request unchanged
    Continue,
    /// Short-circuit with a redirect to the given path
    RedirectTo(String),
}

#[derive(Debug, Clone)]
pub struct SessionGate {
    classifier: PathClassifier,
    cookie_name: String,
    login_path: String,
}

impl SessionGate {
    /// Build a gate whose only public path is `login_path`
    pub fn new(cookie_name: impl Into<String>, login_path: impl Into<String>) -> Self {
        let login_path = login_path.into();

        Self {
            classifier: PathClassifier::new(vec![login_path.clone()]),
            cookie_name: cookie_name.into(),
            login_path,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Whether the session cookie is present.
    ///
    /// An empty value counts as absent, quoted (`""`) or not. RFC 6265
    /// allows one pair of double quotes around a cookie value.
    pub fn has_session<C: CookieLookup + ?Sized>(&self, cookies: &C) -> bool {
        cookies
            .cookie_value(&self.cookie_name)
            .is_some_and(|value| !unquote(&value).is_empty())
    }

    pub fn evaluate<C: CookieLookup + ?Sized>(&self, path: &str, cookies: &C) -> GateDecision {
        match self.classifier.classify(path) {
            PathKind::Public => GateDecision::Continue,
            PathKind::Protected if self.has_session(cookies) => GateDecision::Continue,
            PathKind::Protected => GateDecision::RedirectTo(self.login_path.clone()),
        }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE, DEFAULT_LOGIN_PATH)
    }
}
