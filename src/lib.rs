//! Bastion Server - demo HTTP server protected by the Basic auth interceptors.
//!
//! `/health` is open; everything else goes through `bastion_http`'s
//! middleware backed by a `bastion_auth::BasicAuthServer`.

pub mod config;
pub mod routes;

use axum::Router;
use axum::routing::get;
use bastion_auth::BasicAuthServer;
use tower_http::trace::TraceLayer;

/// Builds the HTTP router.
pub fn router(auth: BasicAuthServer) -> Router {
    let protected = bastion_http::protect(Router::new().route("/whoami", get(routes::whoami)), auth);

    Router::new()
        .route("/health", get(routes::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
}
