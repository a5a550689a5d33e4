//! # Health Check Handler
//!
//! Liveness probe for load balancers and the desktop wrapper. Lives under
//! `/api`, so the route matcher lets it through without a session.

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /api/health
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "facturado-gate"
/// }
/// ```
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "facturado-gate"
    }))
}
