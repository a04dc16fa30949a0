//! HTTP mapping of interceptor errors.

use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bastion_auth::AuthError;
use serde::Serialize;

/// Error returned by the HTTP adapters.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected by the interceptor itself (bad credentials or no validator).
    /// Carries the challenge to send back, if the interceptor issued one.
    #[error("{source}")]
    Rejected {
        source: AuthError,
        challenge: Option<HeaderValue>,
    },

    /// Client sent credentials that could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MalformedCredentialEncoding(e) => {
                Self::BadRequest(format!("malformed credential encoding: {e}"))
            }
            AuthError::ValidatorFailure(e) => Self::Internal(e.to_string()),
            source => Self::Rejected {
                source,
                challenge: None,
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    /// Error code (e.g. "UNAUTHORIZED", "bad_request", "internal_error").
    pub(crate) error: String,
    /// Human-readable error detail, if available.
    pub(crate) detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detail, challenge) = match self {
            ApiError::Rejected { source, challenge } => {
                let error = match source.reason() {
                    Some(reason) => reason,
                    None => {
                        tracing::error!(%source, "request rejected by misconfigured interceptor");
                        "validator_not_configured"
                    }
                };
                (
                    source.status().unwrap_or(StatusCode::UNAUTHORIZED),
                    error,
                    Some(source.to_string()),
                    challenge,
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg), None),
            ApiError::Internal(msg) => {
                tracing::error!(%msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    Some(msg),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error.to_owned(),
            detail,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(challenge) = challenge {
            response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
        }
        response
    }
}
