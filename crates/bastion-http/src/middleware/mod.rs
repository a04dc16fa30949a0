//! HTTP middleware: Basic authentication for axum routers.

pub mod auth;
