//! Server-side interceptor: validates inbound Basic credentials or challenges.

use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use http::HeaderValue;
use http::header::{AUTHORIZATION, WWW_AUTHENTICATE};

use crate::BASIC;
use crate::error::AuthError;
use crate::handler::{Handler, Middleware};
use crate::options::{Config, Options};
use crate::transport::Context;

/// Standard alphabet with canonical padding. Non-zero trailing bits in the
/// last symbol are ignored rather than rejected.
const CREDENTIALS: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Outcome of checking one `Authorization` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The validator accepted the credentials.
    Authorized { username: String },
    /// Missing, malformed or rejected credentials: the caller must challenge.
    Challenge,
}

/// Server-side Basic authentication interceptor.
///
/// Cheap to clone; all clones share one frozen configuration.
#[derive(Clone)]
pub struct BasicAuthServer {
    config: Arc<Config>,
}

impl BasicAuthServer {
    pub fn new(options: Options) -> Self {
        Self {
            config: Arc::new(options.freeze()),
        }
    }

    pub fn realm(&self) -> &str {
        self.config.realm()
    }

    /// The `WWW-Authenticate` value sent with every challenge.
    pub fn challenge(&self) -> &HeaderValue {
        self.config.challenge()
    }

    /// Checks an `Authorization` header value without touching any transport.
    ///
    /// Returns `Err` for a missing validator, undecodable base64 and
    /// validator failures; these are not authentication failures and are
    /// never turned into a challenge.
    pub fn verify(
        &self,
        authorization: Option<&[u8]>,
        ctx: &Context,
    ) -> Result<Verdict, AuthError> {
        if !self.config.has_validator() {
            return Err(AuthError::ValidatorNotConfigured);
        }

        let Some(encoded) = authorization.and_then(strip_scheme) else {
            return Ok(Verdict::Challenge);
        };

        let decoded = CREDENTIALS.decode(encoded)?;

        let Some(sep) = decoded.iter().position(|&b| b == b':') else {
            return Ok(Verdict::Challenge);
        };
        let (Ok(username), Ok(password)) = (
            std::str::from_utf8(&decoded[..sep]),
            std::str::from_utf8(&decoded[sep + 1..]),
        ) else {
            return Ok(Verdict::Challenge);
        };

        let valid = self
            .config
            .validate(username, password, ctx)
            .ok_or(AuthError::ValidatorNotConfigured)?
            .map_err(AuthError::ValidatorFailure)?;

        if valid {
            Ok(Verdict::Authorized {
                username: username.to_owned(),
            })
        } else {
            Ok(Verdict::Challenge)
        }
    }

    /// Authenticates the request carried by the context's server transport.
    ///
    /// On a challenge the `WWW-Authenticate` header is set on the reply and
    /// `AuthError::Unauthorized` is returned.
    pub fn authenticate(&self, ctx: &mut Context) -> Result<(), AuthError> {
        if !self.config.has_validator() {
            tracing::warn!("basic auth request rejected: no validator configured");
            return Err(AuthError::ValidatorNotConfigured);
        }

        let Some(transport) = ctx.server_transport() else {
            return Err(AuthError::Unauthorized);
        };
        let authorization = transport
            .request_header()
            .get(AUTHORIZATION)
            .map(|v| v.as_bytes());

        match self.verify(authorization, ctx)? {
            Verdict::Authorized { username } => {
                tracing::debug!(%username, "basic auth accepted");
                Ok(())
            }
            Verdict::Challenge => {
                tracing::debug!(realm = %self.realm(), "basic auth challenge issued");
                if let Some(transport) = ctx.server_transport_mut() {
                    transport
                        .reply_header_mut()
                        .insert(WWW_AUTHENTICATE, self.challenge().clone());
                }
                Err(AuthError::Unauthorized)
            }
        }
    }
}

/// Returns the credential part of `Basic <credentials>`.
///
/// The header must be longer than `"Basic "` and start with a
/// case-insensitive `Basic`; the byte after the scheme is skipped.
fn strip_scheme(bytes: &[u8]) -> Option<&[u8]> {
    let scheme = BASIC.len();
    if bytes.len() > scheme + 1 && bytes[..scheme].eq_ignore_ascii_case(BASIC.as_bytes()) {
        Some(&bytes[scheme + 1..])
    } else {
        None
    }
}

impl<H> Middleware<H> for BasicAuthServer {
    type Handler = ServerHandler<H>;

    fn wrap(&self, inner: H) -> ServerHandler<H> {
        ServerHandler {
            auth: self.clone(),
            inner,
        }
    }
}

/// Handler produced by wrapping another handler with [`BasicAuthServer`].
#[derive(Clone)]
pub struct ServerHandler<H> {
    auth: BasicAuthServer,
    inner: H,
}

impl<H, Req> Handler<Req> for ServerHandler<H>
where
    H: Handler<Req>,
    H::Error: From<AuthError>,
{
    type Response = H::Response;
    type Error = H::Error;

    fn handle(&self, ctx: &mut Context, req: Req) -> Result<H::Response, H::Error> {
        self.auth.authenticate(ctx)?;
        self.inner.handle(ctx, req)
    }
}
