//! Server configuration via CLI args and environment variables.

use bastion_auth::Options;
use clap::Parser;

/// Demo HTTP server guarded by Basic authentication.
#[derive(Parser, Debug, Clone)]
#[command(name = "bastion-server", version, about)]
pub struct Config {
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0", env = "BASTION_HOST")]
    pub host: String,

    /// Bind port.
    #[arg(long, default_value_t = 8080, env = "BASTION_PORT")]
    pub port: u16,

    /// Realm announced in `WWW-Authenticate` challenges. Defaults to "Restricted".
    #[arg(long, env = "BASTION_REALM")]
    pub realm: Option<String>,

    /// Username accepted by the protected routes.
    #[arg(long, env = "BASTION_AUTH_USER")]
    pub auth_user: Option<String>,

    /// Password accepted by the protected routes.
    #[arg(long, env = "BASTION_AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: Option<String>,

    /// Log level.
    #[arg(long, default_value = "info", env = "BASTION_LOG_LEVEL")]
    pub log_level: String,

    /// Log format: "pretty" or "json".
    #[arg(long, default_value = "pretty", env = "BASTION_LOG_FORMAT")]
    pub log_format: String,
}

impl Config {
    /// Parses configuration from CLI args and env vars.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Interceptor options. Without both username and password no validator
    /// is installed and every protected request is refused.
    pub fn auth_options(&self) -> Options {
        let mut options = Options::new();
        if let Some(realm) = &self.realm {
            options = options.with_realm(realm.as_str());
        }
        if let (Some(user), Some(password)) = (&self.auth_user, &self.auth_password) {
            options = options.with_credentials(user, password);
        }
        options
    }
}
