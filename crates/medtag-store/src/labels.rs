//! SQLite-backed label collection.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, params_from_iter, Connection};
use tracing::info;
use uuid::Uuid;

use medtag_core::Label;

use crate::StoreError;

/// SQLite-backed label collection.
///
/// `text` carries no uniqueness constraint; inserting the same text twice
/// yields two records with distinct ids.
pub struct LabelStore {
    conn: Mutex<Connection>,
}

impl LabelStore {
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
        info!("Label store initialized at {}", path.display());
        Ok(store)
    }

    /// Creates an in-memory label store (for testing).
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
            "CREATE TABLE IF NOT EXISTS labels (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL
            );",
        )?;

        Ok(())
    }

    /// Inserts a new label with a store-assigned id.
    pub fn insert(&self, text: &str) -> Result<Label, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let label = Label::new(text);

        conn.execute(
            "INSERT INTO labels (id, text) VALUES (?1, ?2)",
            params![label.id.to_string(), label.text],
        )?;

        Ok(label)
    }

    /// Lists all labels.
    pub fn list(&self) -> Result<Vec<Label>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut stmt = conn.prepare("SELECT id, text FROM labels")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut labels = Vec::new();
        for row in rows {
            let (id, text) = row?;
            labels.push(Label {
                id: Uuid::parse_str(&id)
                    .map_err(|e| StoreError::InvalidLabelId(e.to_string()))?,
                text,
            });
        }

        Ok(labels)
    }

    /// Finds all labels whose text is in the given list.
    pub fn find_by_texts(&self, texts: &[String]) -> Result<Vec<Label>, StoreError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let placeholders = vec!["?"; texts.len()].join(", ");
        let sql = format!("SELECT id, text FROM labels WHERE text IN ({})", placeholders);
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt.query_map(params_from_iter(texts.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut labels = Vec::new();
        for row in rows {
            let (id, text) = row?;
            labels.push(Label {
                id: Uuid::parse_str(&id)
                    .map_err(|e| StoreError::InvalidLabelId(e.to_string()))?,
                text,
            });
        }

        Ok(labels)
    }

    /// Deletes all labels matching the given ids in one batch statement.
    ///
    /// Ids with no matching record are silently skipped. Returns the number
    /// of records removed.
    pub fn delete_many(&self, ids: &[Uuid]) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM labels WHERE id IN ({})", placeholders);
        let removed = conn.execute(
            &sql,
            params_from_iter(ids.iter().map(|id| id.to_string())),
        )?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_list() {
        let store = LabelStore::in_memory().unwrap();

        let lesion = store.insert("lesion").unwrap();
        store.insert("cyst").unwrap();

        let labels = store.list().unwrap();
        assert_eq!(labels.len(), 2);
        assert!(labels.iter().any(|l| l.id == lesion.id && l.text == "lesion"));
    }

    #[test]
    fn duplicate_texts_are_allowed() {
        let store = LabelStore::in_memory().unwrap();

        let a = store.insert("lesion").unwrap();
        let b = store.insert("lesion").unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn find_by_texts_matches_existing_subset() {
        let store = LabelStore::in_memory().unwrap();
        store.insert("lesion").unwrap();
        store.insert("cyst").unwrap();

        let found = store
            .find_by_texts(&["lesion".to_string(), "tumor".to_string()])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "lesion");

        assert!(store.find_by_texts(&[]).unwrap().is_empty());
    }

    #[test]
    fn delete_many_removes_matching_ids_only() {
        let store = LabelStore::in_memory().unwrap();
        let a = store.insert("lesion").unwrap();
        let b = store.insert("cyst").unwrap();

        let removed = store.delete_many(&[a.id, Uuid::new_v4()]).unwrap();
        assert_eq!(removed, 1);

        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }
}
