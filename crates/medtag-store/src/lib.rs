//! Persistence for the medtag labeling backend.
//!
//! Two document collections backed by SQLite plus one filesystem directory:
//!
//! - [`UserStore`] — user documents keyed by email
//! - [`LabelStore`] — label records with store-assigned identifiers
//! - [`ImageDir`] — uploaded image files, keyed by filename
//!
//! Every store is an explicit value constructed by the caller and passed
//! down — there is no process-wide handle. [`UserStore::in_memory`] and
//! [`LabelStore::in_memory`] give tests a substitutable store without
//! touching disk.

use thiserror::Error;

pub mod images;
pub mod labels;
pub mod users;

pub use images::ImageDir;
pub use labels::LabelStore;
pub use users::UserStore;

/// Errors from store operations.
///
/// Display strings double as client-facing messages, so the resource
/// variants word them the way the API reports them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Lock error")]
    Lock,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid label id: {0}")]
    InvalidLabelId(String),
    #[error("Image folder not found")]
    DirMissing,
    #[error("Image {0} not found")]
    FileNotFound(String),
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}
