//! Constant-time credential comparison over SHA-256 digests.

use sha2::{Digest as _, Sha256};
use subtle::{Choice, ConstantTimeEq};

/// SHA-256 output of a username or password.
pub type Digest = [u8; 32];

/// One-way digest used both when configuring credentials and when checking them.
pub fn digest(value: &str) -> Digest {
    Sha256::digest(value.as_bytes()).into()
}

/// Constant-time comparison of two digests.
pub fn compare(candidate: &Digest, expected: &Digest) -> bool {
    candidate.ct_eq(expected).into()
}

/// Checks both fields without short-circuiting, so timing does not reveal
/// which of the two failed.
pub fn credentials_match(
    candidate_user: &Digest,
    candidate_password: &Digest,
    expected_user: &Digest,
    expected_password: &Digest,
) -> bool {
    let user: Choice = candidate_user.ct_eq(expected_user);
    let password: Choice = candidate_password.ct_eq(expected_password);
    (user & password).into()
}
