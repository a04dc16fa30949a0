//! Bastion HTTP: axum and tower adapters for the Basic authentication interceptors.
//!
//! - [`middleware::auth::basic_auth_middleware`] runs `BasicAuthServer` in
//!   front of an axum router and turns its verdicts into HTTP responses.
//! - [`client::BasicAuthLayer`] runs `BasicAuthClient` on outbound
//!   `http::Request`s sent through any tower service.

pub mod client;
pub mod error;
pub mod middleware;

use axum::Router;
use bastion_auth::BasicAuthServer;

pub use client::{BasicAuthLayer, BasicAuthService};
pub use error::{ApiError, ErrorBody};
pub use middleware::auth::{AuthenticatedUser, basic_auth_middleware};

/// Requires Basic authentication on every route of `router`.
pub fn protect<S>(router: Router<S>, auth: BasicAuthServer) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(
        auth,
        basic_auth_middleware,
    ))
}
