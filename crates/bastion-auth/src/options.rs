//! Interceptor configuration.
//!
//! Options are applied in the order they are supplied. Installing a
//! validator is first-writer-wins: once a validator is set, later
//! `with_validator` / `with_credentials` calls leave it in place. The realm
//! is last-writer-wins.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;

use crate::error::BoxError;
use crate::transport::Context;
use crate::validator::{DigestValidator, Validator, validator_fn};
use crate::{BASIC, DEFAULT_REALM};

/// A single configuration option, for callers that assemble options as data.
pub enum AuthOption {
    /// Install a custom validator (ignored if one is already installed).
    Validator(Validator),
    /// Set the realm. An empty realm means the default.
    Realm(String),
    /// Store the expected credentials and install the digest validator
    /// (ignored if a validator is already installed).
    Credentials { username: String, password: String },
}

#[derive(Clone)]
enum Installed {
    Custom(Validator),
    Credentials,
}

/// Interceptor options, built before the interceptor and frozen by it.
#[derive(Clone, Default)]
pub struct Options {
    validator: Option<Installed>,
    realm: String,
    credentials: DigestValidator,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, option: AuthOption) {
        match option {
            AuthOption::Validator(v) => self.install(Installed::Custom(v)),
            AuthOption::Realm(realm) => self.realm = realm,
            AuthOption::Credentials { username, password } => {
                self.credentials = DigestValidator::new(&username, &password);
                self.install(Installed::Credentials);
            }
        }
    }

    fn install(&mut self, validator: Installed) {
        if self.validator.is_none() {
            self.validator = Some(validator);
        }
    }

    /// Installs a custom validator unless one is already set.
    #[must_use]
    pub fn with_validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, &Context) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.apply(AuthOption::Validator(validator_fn(f)));
        self
    }

    /// Sets the realm that identifies the protected space to clients.
    /// Defaults to `"Restricted"`.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.apply(AuthOption::Realm(realm.into()));
        self
    }

    /// Checks requests against a fixed username and password.
    ///
    /// Only the SHA-256 digests are kept. The digest validator is installed
    /// unless a validator is already set.
    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = DigestValidator::new(username, password);
        self.install(Installed::Credentials);
        self
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    pub(crate) fn freeze(self) -> Config {
        let realm = if self.realm.is_empty() {
            DEFAULT_REALM.to_owned()
        } else {
            self.realm
        };
        Config {
            challenge: challenge_header(&realm),
            client_authorization: client_header(&realm),
            validator: self.validator,
            credentials: self.credentials,
            realm,
        }
    }
}

impl FromIterator<AuthOption> for Options {
    fn from_iter<I: IntoIterator<Item = AuthOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.apply(option);
        }
        options
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validator = match self.validator {
            Some(Installed::Custom(_)) => "custom",
            Some(Installed::Credentials) => "credentials",
            None => "none",
        };
        f.debug_struct("Options")
            .field("validator", &validator)
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}

/// Frozen configuration shared by an interceptor for its whole lifetime.
pub(crate) struct Config {
    validator: Option<Installed>,
    credentials: DigestValidator,
    realm: String,
    challenge: HeaderValue,
    client_authorization: HeaderValue,
}

impl Config {
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Runs the installed validator, or `None` if there is none.
    pub fn validate(
        &self,
        username: &str,
        password: &str,
        ctx: &Context,
    ) -> Option<Result<bool, BoxError>> {
        match self.validator.as_ref()? {
            Installed::Custom(v) => Some(v(username, password, ctx)),
            Installed::Credentials => Some(Ok(self.credentials.validate(username, password, ctx))),
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn challenge(&self) -> &HeaderValue {
        &self.challenge
    }

    pub fn client_authorization(&self) -> &HeaderValue {
        &self.client_authorization
    }
}

/// `Basic realm=Restricted` for the default realm, `Basic realm="<realm>"` otherwise.
fn challenge_header(realm: &str) -> HeaderValue {
    let value = if realm == DEFAULT_REALM {
        format!("{BASIC} realm={DEFAULT_REALM}")
    } else {
        format!("{BASIC} realm={realm:?}")
    };
    header_value(&value)
}

/// `Basic realm=Restricted` for the default realm, `Basic realm=<base64(realm)>` otherwise.
fn client_header(realm: &str) -> HeaderValue {
    let value = if realm == DEFAULT_REALM {
        format!("{BASIC} realm={DEFAULT_REALM}")
    } else {
        format!("{BASIC} realm={}", STANDARD.encode(realm))
    };
    header_value(&value)
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_bytes(value.as_bytes()).unwrap_or_else(|_| {
        tracing::warn!(value, "realm is not a valid header value, using default realm");
        HeaderValue::from_static("Basic realm=Restricted")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(config: &Config, user: &str, pass: &str) -> bool {
        config
            .validate(user, pass, &Context::new())
            .expect("validator installed")
            .expect("validator succeeded")
    }

    #[test]
    fn realm_defaults_to_restricted() {
        assert_eq!(Options::new().freeze().realm(), "Restricted");
        assert_eq!(Options::new().with_realm("").freeze().realm(), "Restricted");
    }

    #[test]
    fn realm_last_writer_wins() {
        let config = Options::new()
            .with_realm("first")
            .with_realm("second")
            .freeze();
        assert_eq!(config.realm(), "second");
    }

    #[test]
    fn no_validator_by_default() {
        let config = Options::new().with_realm("x").freeze();
        assert!(!config.has_validator());
        assert!(config.validate("a", "b", &Context::new()).is_none());
    }

    #[test]
    fn first_validator_wins() {
        let config = Options::new()
            .with_validator(|_, _, _| Ok(true))
            .with_validator(|_, _, _| Ok(false))
            .freeze();
        assert!(check(&config, "anyone", "anything"));
    }

    #[test]
    fn custom_validator_set_first_beats_credentials() {
        let config = Options::new()
            .with_validator(|user, _, _| Ok(user == "custom"))
            .with_credentials("alice", "secret")
            .freeze();
        assert!(check(&config, "custom", "whatever"));
        assert!(!check(&config, "alice", "secret"));
    }

    #[test]
    fn credentials_set_first_beat_custom_validator() {
        let config = Options::new()
            .with_credentials("alice", "secret")
            .with_validator(|_, _, _| Ok(true))
            .freeze();
        assert!(check(&config, "alice", "secret"));
        assert!(!check(&config, "alice", "wrong"));
    }

    #[test]
    fn later_credentials_replace_digests() {
        let config = Options::new()
            .with_credentials("alice", "secret")
            .with_credentials("bob", "hunter2")
            .freeze();
        assert!(check(&config, "bob", "hunter2"));
        assert!(!check(&config, "alice", "secret"));
    }

    #[test]
    fn options_apply_in_iteration_order() {
        let options: Options = vec![
            AuthOption::Realm("admin".into()),
            AuthOption::Validator(validator_fn(|_, _, _| Ok(false))),
            AuthOption::Credentials {
                username: "alice".into(),
                password: "secret".into(),
            },
        ]
        .into_iter()
        .collect();

        let config = options.freeze();
        assert_eq!(config.realm(), "admin");
        assert!(!check(&config, "alice", "secret"));
    }

    #[test]
    fn challenge_quotes_only_custom_realms() {
        let default = Options::new().freeze();
        assert_eq!(default.challenge(), "Basic realm=Restricted");

        let custom = Options::new().with_realm("Admin Area").freeze();
        assert_eq!(custom.challenge(), "Basic realm=\"Admin Area\"");

        let quoted = Options::new().with_realm("say \"hi\"").freeze();
        assert_eq!(quoted.challenge(), "Basic realm=\"say \\\"hi\\\"\"");
    }

    #[test]
    fn client_header_encodes_custom_realms() {
        let default = Options::new().freeze();
        assert_eq!(default.client_authorization(), "Basic realm=Restricted");

        let custom = Options::new().with_realm("admin").freeze();
        assert_eq!(custom.client_authorization(), "Basic realm=YWRtaW4=");
    }

    #[test]
    fn debug_does_not_leak_credentials() {
        let options = Options::new().with_credentials("alice", "secret");
        let debug = format!("{options:?}");
        assert!(debug.contains("credentials"));
        assert!(!debug.contains("secret"));
    }
}
