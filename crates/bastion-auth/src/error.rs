//! Interceptor error kinds.
//!
//! `AuthError` is transport-agnostic. The HTTP adapter maps it to status
//! codes, challenge headers and JSON bodies.

use http::StatusCode;

/// Boxed error returned by custom validators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reason code carried by [`AuthError::Unauthorized`].
pub const REASON: &str = "UNAUTHORIZED";

/// Errors produced by the server and client interceptors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No validator was installed in the options. Server misconfiguration,
    /// never accompanied by a challenge.
    #[error("basic auth validator is not set")]
    ValidatorNotConfigured,

    /// Credentials absent, malformed or mismatched.
    #[error("not authorized")]
    Unauthorized,

    /// The credential part of the `Authorization` header is not valid base64.
    #[error("malformed credential encoding: {0}")]
    MalformedCredentialEncoding(#[from] base64::DecodeError),

    /// A custom validator failed independently of credential correctness.
    #[error("validator failure: {0}")]
    ValidatorFailure(#[source] BoxError),
}

impl AuthError {
    /// HTTP status for the interceptor's own rejections.
    ///
    /// Errors that merely pass through the interceptor (bad encoding,
    /// validator failures) have no status of their own.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ValidatorNotConfigured | Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::MalformedCredentialEncoding(_) | Self::ValidatorFailure(_) => None,
        }
    }

    /// Client-facing reason code. Only `Unauthorized` has one.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized => Some(REASON),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
