//! Bastion Auth: HTTP Basic authentication (RFC 7617) as pipeline interceptors.
//!
//! - [`BasicAuthServer`] checks the inbound `Authorization` header against a
//!   pluggable validator and answers failures with a `WWW-Authenticate`
//!   challenge.
//! - [`BasicAuthClient`] attaches an `Authorization` header to outbound
//!   requests.
//!
//! Both are configured from [`Options`] and plug into any pipeline built
//! from [`Handler`]s. Header access goes through the [`Transporter`] found in
//! the request [`Context`].
//!
//! **Zero transport dependencies**: no axum, no tower. See `bastion-http`
//! for the HTTP adapters.

pub mod client;
pub mod compare;
pub mod error;
pub mod handler;
pub mod options;
pub mod server;
pub mod transport;
pub mod validator;

pub use client::{BasicAuthClient, ClientHandler, encode_credentials};
pub use error::{AuthError, BoxError, REASON};
pub use handler::{Handler, HandlerFn, Middleware, handler_fn};
pub use options::{AuthOption, Options};
pub use server::{BasicAuthServer, ServerHandler, Verdict};
pub use transport::{Context, HeaderTransport, Kind, Transporter};
pub use validator::{DigestValidator, Validator, validator_fn};

/// Authentication scheme token.
pub const BASIC: &str = "Basic";

/// Realm used when none (or an empty one) is configured.
pub const DEFAULT_REALM: &str = "Restricted";
