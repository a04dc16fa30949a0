//! Pluggable credential validators.

use std::sync::Arc;

use crate::compare::{self, Digest};
use crate::error::BoxError;
use crate::transport::Context;

/// Credential check: `(username, password, context) -> Result<valid, error>`.
///
/// An `Err` means the check itself could not be performed (e.g. a database
/// lookup failed) and is propagated to the caller instead of being turned
/// into a 401.
pub type Validator = Arc<dyn Fn(&str, &str, &Context) -> Result<bool, BoxError> + Send + Sync>;

/// Wraps a closure as a [`Validator`].
pub fn validator_fn<F>(f: F) -> Validator
where
    F: Fn(&str, &str, &Context) -> Result<bool, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Default validator: compares SHA-256 digests of the presented credentials
/// against digests computed at configuration time.
#[derive(Clone, Copy, Default)]
pub struct DigestValidator {
    expected_username: Digest,
    expected_password: Digest,
}

impl DigestValidator {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            expected_username: compare::digest(username),
            expected_password: compare::digest(password),
        }
    }

    /// Never fails; the context is accepted only to share the validator signature.
    pub fn validate(&self, username: &str, password: &str, _ctx: &Context) -> bool {
        compare::credentials_match(
            &compare::digest(username),
            &compare::digest(password),
            &self.expected_username,
            &self.expected_password,
        )
    }
}

impl std::fmt::Debug for DigestValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DigestValidator(<redacted>)")
    }
}
