//! Basic authentication middleware for axum.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use bastion_auth::{AuthError, BasicAuthServer, Context, HeaderTransport, Verdict};

use crate::error::ApiError;

/// Username of the caller, inserted into request extensions once the
/// credentials have been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Middleware that checks `Authorization: Basic <credentials>` on every request.
///
/// Rejected requests get `401` with a `WWW-Authenticate` challenge. Use with
/// `axum::middleware::from_fn_with_state(server, basic_auth_middleware)`.
///
/// The request headers are copied into the validator's context once per request.
pub async fn basic_auth_middleware(
    State(auth): State<BasicAuthServer>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = Context::with_server_transport(
        HeaderTransport::server(req.headers().clone()).with_operation(req.uri().path()),
    );

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.as_bytes());

    match auth.verify(authorization, &ctx)? {
        Verdict::Authorized { username } => {
            tracing::debug!(%username, path = %req.uri().path(), "basic auth accepted");
            req.extensions_mut().insert(AuthenticatedUser(username));
            Ok(next.run(req).await)
        }
        Verdict::Challenge => {
            tracing::debug!(path = %req.uri().path(), realm = %auth.realm(), "basic auth challenge issued");
            Err(ApiError::Rejected {
                source: AuthError::Unauthorized,
                challenge: Some(auth.challenge().clone()),
            })
        }
    }
}
