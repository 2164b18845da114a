//! Core domain types for the medtag labeling backend.
//!
//! This crate provides the fundamental types shared across the medtag
//! workspace:
//!
//! - [`User`] — a registered account with its image associations
//! - [`Label`] — a label record with a store-assigned identifier
//! - [`ImageAssociation`] — an image-to-labels link embedded in a user
//! - [`password`] — salted one-way password hashing and verification
//!
//! # Example
//!
//! ```rust
//! use medtag_core::{ImageAssociation, User};
//!
//! let mut user = User::new("doctor@example.com", "$argon2id$...", true);
//! user.add_image(ImageAssociation {
//!     filename: "scan-042.png".to_string(),
//!     labels: vec!["lesion".to_string()],
//! });
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod password;

/// The literal `adminId` value that grants administrator status during
/// registration.
pub const ADMIN_SENTINEL: &str = "0000";

/// A registered user account.
///
/// Serialized as a JSON document (camelCase keys) both on the wire and in
/// the document store, so the stored shape matches the API shape:
/// `{email, password, isAdmin, images}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique key across all users.
    pub email: String,
    /// Salted one-way password hash in PHC string form.
    pub password: String,
    /// Administrator flag, decided at registration time.
    pub is_admin: bool,
    /// Image associations owned by this user.
    #[serde(default)]
    pub images: Vec<ImageAssociation>,
}

impl User {
    /// Creates a new user with no image associations.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, is_admin: bool) -> Self {
        Self {
            email: email.into(),
            password: password_hash.into(),
            is_admin,
            images: Vec::new(),
        }
    }

    /// Adds an association with set semantics: an entry identical to an
    /// existing one is not appended again. The same filename with a
    /// different label list is a distinct entry and IS appended.
    ///
    /// Returns `true` if the association was appended.
    pub fn add_image(&mut self, assoc: ImageAssociation) -> bool {
        if self.images.contains(&assoc) {
            return false;
        }
        self.images.push(assoc);
        true
    }
}

/// An image-to-labels link stored embedded in the owning [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAssociation {
    /// Filename within the configured image directory.
    pub filename: String,
    /// Label texts attached to the image.
    pub labels: Vec<String>,
}

/// A label record.
///
/// The identifier is assigned by the store at creation time. `text` carries
/// no uniqueness constraint; duplicate texts are possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Store-assigned opaque identifier.
    pub id: Uuid,
    /// Display text.
    pub text: String,
}

impl Label {
    /// Creates a label with a freshly assigned identifier.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}
