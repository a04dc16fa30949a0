//! Bastion Server entry point.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use bastion_auth::BasicAuthServer;
use bastion_server::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let options = config.auth_options();
    if !options.has_validator() {
        tracing::warn!(
            "no credentials configured (--auth-user/--auth-password); protected routes will reject every request"
        );
    }
    let auth = BasicAuthServer::new(options);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        realm = auth.realm(),
        "Bastion Server starting",
    );

    let app = bastion_server::router(auth);

    let addr = SocketAddr::new(config.host.parse().expect("invalid host"), config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "Bastion Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("Bastion Server shut down");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install signal handler");
    tracing::info!("Shutdown signal received");
}
