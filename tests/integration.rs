//! Integration tests for the Bastion demo server.
//!
//! Each test starts a server on an ephemeral port and uses reqwest to
//! exercise the endpoints.

use std::net::SocketAddr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bastion_auth::{BasicAuthServer, Options};
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

/// Boots a server with the given options on an OS-assigned port.
/// Returns the base URL (e.g. "http://127.0.0.1:12345").
async fn spawn_server(options: Options) -> String {
    let app = bastion_server::router(BasicAuthServer::new(options));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn alice() -> Options {
    Options::new().with_credentials("alice", "secret")
}

// ---------------------------------------------------------------------------
// Open routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_needs_no_credentials() {
    let base = spawn_server(alice()).await;

    let resp = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ---------------------------------------------------------------------------
// Protected routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_credentials_are_accepted() {
    let base = spawn_server(alice()).await;

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .basic_auth("alice", Some("secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn wrong_password_is_challenged() {
    let base = spawn_server(alice()).await;

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .header("authorization", "Basic YWxpY2U6d3Jvbmc=")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()["www-authenticate"],
        "Basic realm=Restricted"
    );

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn missing_credentials_get_custom_realm() {
    let base = spawn_server(alice().with_realm("Admin Area")).await;

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()["www-authenticate"],
        "Basic realm=\"Admin Area\""
    );
}

#[tokio::test]
async fn lowercase_scheme_is_accepted() {
    let base = spawn_server(alice()).await;
    let header = format!("basic {}", STANDARD.encode("alice:secret"));

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .header("authorization", header)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn credentials_without_separator_are_challenged() {
    let base = spawn_server(alice()).await;
    let header = format!("Basic {}", STANDARD.encode("alicesecret"));

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .header("authorization", header)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key("www-authenticate"));
}

#[tokio::test]
async fn malformed_base64_is_bad_request() {
    let base = spawn_server(alice()).await;

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .header("authorization", "Basic not*base64")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!resp.headers().contains_key("www-authenticate"));
}

#[tokio::test]
async fn server_without_validator_rejects_everything() {
    let base = spawn_server(Options::new()).await;

    let resp = Client::new()
        .get(format!("{base}/whoami"))
        .basic_auth("alice", Some("secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(!resp.headers().contains_key("www-authenticate"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "validator_not_configured");
}

#[tokio::test]
async fn custom_validator_decides() {
    let options = Options::new()
        .with_validator(|user, password, _| Ok(user == "svc" && password.starts_with("tok-")));
    let base = spawn_server(options).await;
    let client = Client::new();

    let ok = client
        .get(format!("{base}/whoami"))
        .basic_auth("svc", Some("tok-123"))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let denied = client
        .get(format!("{base}/whoami"))
        .basic_auth("svc", Some("nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
}
