//! # Middleware Module
//!
//! Request interceptors that run before any page or API handler.
//!
//! ## Order of checks
//! 1. `route`: the route matcher drops excluded paths (API, assets, favicon)
//!    straight through to their handlers.
//! 2. `route`: the path classifier marks the login path as public.
//! 3. `session`: the session gate requires the session cookie on every
//!    other path.
//!
//! `auth` wires these into an axum `from_fn_with_state` middleware.

pub mod auth;
pub mod route;
pub mod session;
