//! # HTTP Request Handlers
//!
//! The few endpoints this service answers itself. Pages are static files;
//! the business actions (clients, invoices, credit notes...) live elsewhere.
//!
//! ## Submodules
//! - `health`: Liveness probe
//! - `auth`: Session status, logout, and the `/api` not-found fallback

pub mod auth;
pub mod health;
