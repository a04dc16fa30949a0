//! Client-side interceptor: attaches an `Authorization` header to outbound requests.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use http::header::AUTHORIZATION;

use crate::BASIC;
use crate::error::AuthError;
use crate::handler::{Handler, Middleware};
use crate::options::{Config, Options};
use crate::transport::Context;

/// Client-side interceptor.
///
/// The header it sends is `Basic realm=<realm>` (the realm base64-encoded
/// unless it is the default), not `Basic <base64(user:pass)>`. Use
/// [`encode_credentials`] to build a standard credentials header. A
/// validator must be configured even though the client never calls it.
#[derive(Clone)]
pub struct BasicAuthClient {
    config: Arc<Config>,
}

impl BasicAuthClient {
    pub fn new(options: Options) -> Self {
        Self {
            config: Arc::new(options.freeze()),
        }
    }

    pub fn realm(&self) -> &str {
        self.config.realm()
    }

    /// The `Authorization` value attached to every outbound request, or
    /// `ValidatorNotConfigured` when the options installed no validator.
    pub fn authorization(&self) -> Result<&HeaderValue, AuthError> {
        if !self.config.has_validator() {
            tracing::warn!("basic auth client call rejected: no validator configured");
            return Err(AuthError::ValidatorNotConfigured);
        }
        Ok(self.config.client_authorization())
    }

    /// Sets `Authorization` on the context's client transport.
    pub fn authorize(&self, ctx: &mut Context) -> Result<(), AuthError> {
        let value = self.authorization()?.clone();
        let Some(transport) = ctx.client_transport_mut() else {
            return Err(AuthError::Unauthorized);
        };
        transport.request_header_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Standard RFC 7617 credentials: `Basic base64(username:password)`.
pub fn encode_credentials(username: &str, password: &str) -> String {
    format!("{BASIC} {}", STANDARD.encode(format!("{username}:{password}")))
}

impl<H> Middleware<H> for BasicAuthClient {
    type Handler = ClientHandler<H>;

    fn wrap(&self, inner: H) -> ClientHandler<H> {
        ClientHandler {
            auth: self.clone(),
            inner,
        }
    }
}

/// Handler produced by wrapping another handler with [`BasicAuthClient`].
#[derive(Clone)]
pub struct ClientHandler<H> {
    auth: BasicAuthClient,
    inner: H,
}

impl<H, Req> Handler<Req> for ClientHandler<H>
where
    H: Handler<Req>,
    H::Error: From<AuthError>,
{
    type Response = H::Response;
    type Error = H::Error;

    fn handle(&self, ctx: &mut Context, req: Req) -> Result<H::Response, H::Error> {
        self.auth.authorize(ctx)?;
        self.inner.handle(ctx, req)
    }
}
