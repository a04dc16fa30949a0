//! HTTP handlers for the demo server.

use axum::Json;
use axum::extract::Extension;
use bastion_http::AuthenticatedUser;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct WhoAmIResponse {
    pub username: String,
}

/// Unauthenticated liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Echoes the username accepted by the Basic auth middleware.
pub async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse { username: user.0 })
}
