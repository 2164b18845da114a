//! SQLite-backed user document collection.
//!
//! Users are stored as whole JSON documents keyed by email, so the record
//! stays schema-flexible: `{email, password, isAdmin, images}`.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use tracing::info;

use medtag_core::{ImageAssociation, User};

use crate::StoreError;

/// SQLite-backed user document collection.
pub struct UserStore {
    conn: Mutex<Connection>,
}

impl UserStore {
    /// Opens (or creates) the store at the given database path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("User store initialized at {}", path.display());
        Ok(store)
    }

    /// Creates an in-memory user store (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                email TEXT PRIMARY KEY,
                doc TEXT NOT NULL
            );",
        )?;

        Ok(())
    }

    /// Looks up a user document by email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let result = conn.query_row(
            "SELECT doc FROM users WHERE email = ?1",
            params![email],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a new user document.
    ///
    /// Email is the unique key; inserting an existing email fails with
    /// [`StoreError::DuplicateEmail`].
    pub fn insert(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let doc = serde_json::to_string(user)?;

        let result = conn.execute(
            "INSERT INTO users (email, doc) VALUES (?1, ?2)",
            params![user.email, doc],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Appends an image association to the user's document with set
    /// semantics; an identical `{filename, labels}` entry is not duplicated.
    ///
    /// Read-modify-write, not atomic against concurrent writers to the same
    /// user document. Returns `true` if the association was appended.
    pub fn add_image(&self, email: &str, assoc: ImageAssociation) -> Result<bool, StoreError> {
        let mut user = self
            .find_by_email(email)?
            .ok_or(StoreError::UserNotFound)?;

        if !user.add_image(assoc) {
            return Ok(false);
        }

        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let doc = serde_json::to_string(&user)?;
        conn.execute(
            "UPDATE users SET doc = ?1 WHERE email = ?2",
            params![doc, email],
        )?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assoc(filename: &str, labels: &[&str]) -> ImageAssociation {
        ImageAssociation {
            filename: filename.to_string(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn insert_and_find_roundtrip() {
        let store = UserStore::in_memory().unwrap();
        store
            .insert(&User::new("a@b.c", "hash", true))
            .unwrap();

        let user = store.find_by_email("a@b.c").unwrap().unwrap();
        assert_eq!(user.email, "a@b.c");
        assert!(user.is_admin);
        assert!(user.images.is_empty());

        assert!(store.find_by_email("missing@b.c").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = UserStore::in_memory().unwrap();
        store
            .insert(&User::new("a@b.c", "hash", true))
            .unwrap();

        let err = store
            .insert(&User::new("a@b.c", "other-hash", false))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[test]
    fn add_image_deduplicates_identical_tuples() {
        let store = UserStore::in_memory().unwrap();
        store
            .insert(&User::new("a@b.c", "hash", true))
            .unwrap();

        assert!(store.add_image("a@b.c", assoc("scan.png", &["x"])).unwrap());
        assert!(!store.add_image("a@b.c", assoc("scan.png", &["x"])).unwrap());
        // Same filename, different labels: a distinct entry.
        assert!(store
            .add_image("a@b.c", assoc("scan.png", &["x", "y"]))
            .unwrap());

        let user = store.find_by_email("a@b.c").unwrap().unwrap();
        assert_eq!(user.images.len(), 2);
    }

    #[test]
    fn add_image_for_unknown_user_fails() {
        let store = UserStore::in_memory().unwrap();

        let err = store
            .add_image("missing@b.c", assoc("scan.png", &[]))
            .unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound));
    }
}
