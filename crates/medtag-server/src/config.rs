//! Server configuration from environment variables.

use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub addr: String,
    /// SQLite database file holding the user and label collections.
    pub db_path: String,
    /// Directory holding uploaded image files.
    pub image_dir: String,
}

impl ServerConfig {
    /// Reads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            addr: env::var("MEDTAG_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into()),
            db_path: env::var("MEDTAG_DB").unwrap_or_else(|_| "data/medtag.db".into()),
            image_dir: env::var("MEDTAG_IMAGE_DIR").unwrap_or_else(|_| "images".into()),
        }
    }
}
