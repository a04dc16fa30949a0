//! Transport accessors and the per-request context handed through the pipeline.
//!
//! The interceptors never touch a wire format directly. They read the
//! inbound `Authorization` header and write the challenge (server side) or
//! the outbound `Authorization` header (client side) through a
//! [`Transporter`] found in the [`Context`].

use std::fmt;

use http::HeaderMap;

/// Which side of a call a transport represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Server,
    Client,
}

/// Header access for one request/response exchange.
pub trait Transporter: Send + Sync {
    fn kind(&self) -> Kind;

    /// Logical operation name (route, RPC method), if the transport knows it.
    fn operation(&self) -> &str {
        ""
    }

    /// Headers of the request: inbound on the server, outbound on the client.
    fn request_header(&self) -> &HeaderMap;

    fn request_header_mut(&mut self) -> &mut HeaderMap;

    /// Headers of the reply: outbound on the server, inbound on the client.
    fn reply_header(&self) -> &HeaderMap;

    fn reply_header_mut(&mut self) -> &mut HeaderMap;
}

/// [`Transporter`] backed by two plain `http::HeaderMap`s.
#[derive(Debug, Clone)]
pub struct HeaderTransport {
    kind: Kind,
    operation: String,
    request: HeaderMap,
    reply: HeaderMap,
}

impl HeaderTransport {
    /// Server-side transport seeded with the inbound request headers.
    pub fn server(request: HeaderMap) -> Self {
        Self {
            kind: Kind::Server,
            operation: String::new(),
            request,
            reply: HeaderMap::new(),
        }
    }

    /// Client-side transport with an empty outbound request.
    pub fn client() -> Self {
        Self {
            kind: Kind::Client,
            operation: String::new(),
            request: HeaderMap::new(),
            reply: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }
}

impl Transporter for HeaderTransport {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn operation(&self) -> &str {
        &self.operation
    }

    fn request_header(&self) -> &HeaderMap {
        &self.request
    }

    fn request_header_mut(&mut self) -> &mut HeaderMap {
        &mut self.request
    }

    fn reply_header(&self) -> &HeaderMap {
        &self.reply
    }

    fn reply_header_mut(&mut self) -> &mut HeaderMap {
        &mut self.reply
    }
}

/// Request-scoped context: the transports attached by the surrounding pipeline.
///
/// A context may carry a server transport, a client transport, both (a
/// server handler making downstream calls) or neither.
#[derive(Default)]
pub struct Context {
    server: Option<Box<dyn Transporter>>,
    client: Option<Box<dyn Transporter>>,
}

impl Context {
    /// Context with no transports attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_transport(transport: impl Transporter + 'static) -> Self {
        Self::new().set_server_transport(transport)
    }

    pub fn with_client_transport(transport: impl Transporter + 'static) -> Self {
        Self::new().set_client_transport(transport)
    }

    #[must_use]
    pub fn set_server_transport(mut self, transport: impl Transporter + 'static) -> Self {
        self.server = Some(Box::new(transport));
        self
    }

    #[must_use]
    pub fn set_client_transport(mut self, transport: impl Transporter + 'static) -> Self {
        self.client = Some(Box::new(transport));
        self
    }

    pub fn server_transport(&self) -> Option<&dyn Transporter> {
        self.server.as_deref()
    }

    pub fn server_transport_mut(&mut self) -> Option<&mut (dyn Transporter + 'static)> {
        self.server.as_deref_mut()
    }

    pub fn client_transport(&self) -> Option<&dyn Transporter> {
        self.client.as_deref()
    }

    pub fn client_transport_mut(&mut self) -> Option<&mut (dyn Transporter + 'static)> {
        self.client.as_deref_mut()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("server", &self.server.as_ref().map(|t| t.operation()))
            .field("client", &self.client.as_ref().map(|t| t.operation()))
            .finish()
    }
}
