//! HTTP server for the medtag labeling backend.
//!
//! Thin API layer: each route handler translates one request into store
//! operations on the injected [`ServerState`] and renders a JSON response.
//! There is no session state and no background work.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use medtag_store::{ImageDir, LabelStore, UserStore};

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

/// Shared handles to the two document collections and the image directory.
///
/// Constructed once at startup and injected into every handler via
/// [`axum::extract::State`]; tests substitute in-memory stores and a
/// scratch directory.
pub struct ServerState {
    pub users: UserStore,
    pub labels: LabelStore,
    pub images: ImageDir,
}

/// Builds the application router over the given state.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/googlelogin", post(handlers::auth::google_login))
        .route("/upload", post(handlers::images::upload))
        .route("/images", get(handlers::images::list))
        .route("/images/delete", post(handlers::images::delete))
        .route("/images/{filename}", get(handlers::images::fetch))
        .route(
            "/api/labels",
            get(handlers::labels::list)
                .post(handlers::labels::create)
                .delete(handlers::labels::delete),
        )
        .route("/api/associateLabel", post(handlers::labels::associate))
        .with_state(state)
}
