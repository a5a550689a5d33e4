//! # Route Rules
//!
//! Two pure predicates over the request path:
//! - [`RouteMatcher`] decides whether a request is intercepted at all.
//!   Excluded paths (API routes, built assets, the favicon) bypass the gate
//!   entirely.
//! - [`PathClassifier`] decides whether an intercepted path is public or
//!   needs a session.
//!
//! Both are plain values built at startup and handed to the middleware, so
//! tests can construct alternative rule sets freely.

/// Prefixes excluded from interception by default
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image"];

/// Exact paths excluded from interception by default
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &["/favicon.ico"];

/// Static exclusion rules applied before classification
///
/// A prefix matches on segment boundaries: `/api` excludes `/api` and
/// `/api/clients` but not `/apiary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatcher {
    excluded_prefixes: Vec<String>,
    excluded_paths: Vec<String>,
}

impl RouteMatcher {
    pub fn new(excluded_prefixes: Vec<String>, excluded_paths: Vec<String>) -> Self {
        let excluded_prefixes = excluded_prefixes
            .into_iter()
            .map(|prefix| prefix.trim_end_matches('/').to_string())
            .filter(|prefix| !prefix.is_empty())
            .collect();

        Self {
            excluded_prefixes,
            excluded_paths,
        }
    }

    /// Returns `true` when the gate must run for `path`
    pub fn intercepts(&self, path: &str) -> bool {
        !self.is_excluded(path)
    }

    fn is_excluded(&self, path: &str) -> bool {
        if self.excluded_paths.iter().any(|exact| exact == path) {
            return true;
        }

        self.excluded_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_PREFIXES.iter().map(|p| p.to_string()).collect(),
            DEFAULT_EXCLUDED_PATHS.iter().map(|p| p.to_string()).collect(),
        )
    }
}

/// Whether an intercepted path needs a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Public,
    Protected,
}

/// Classifies intercepted paths as public or protected
///
/// Public paths are matched exactly; `/login/` and `/login?x` (the query is
/// never part of the path) are different strings and `/login/` is protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathClassifier {
    public_paths: Vec<String>,
}

impl PathClassifier {
    pub fn new(public_paths: Vec<String>) -> Self {
        Self { public_paths }
    }

    pub fn classify(&self, path: &str) -> PathKind {
        if self.public_paths.iter().any(|public| public == path) {
            PathKind::Public
        } else {
            PathKind::Protected
        }
    }
}
