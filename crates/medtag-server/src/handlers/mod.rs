//! HTTP route handlers for the medtag server.

pub mod auth;
pub mod images;
pub mod labels;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
