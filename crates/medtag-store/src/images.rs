//! Image files on local disk, keyed by filename.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::StoreError;

/// Listing only admits these suffixes (case-sensitive).
const IMAGE_SUFFIXES: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// A fixed directory of uploaded image files.
///
/// Filenames are untrusted path components: anything empty, absolute, or
/// containing a separator or parent reference is rejected before touching
/// the filesystem, confining all access to the configured directory.
pub struct ImageDir {
    root: PathBuf,
}

impl ImageDir {
    /// Wraps the given directory. The directory is not created; operations
    /// that need it report [`StoreError::DirMissing`] when it is absent.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() || name.contains('\\') {
            return Err(StoreError::InvalidFilename(name.to_string()));
        }

        // A single Normal component: no root, no "..", no "a/b".
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(StoreError::InvalidFilename(name.to_string())),
        }
    }

    /// Writes the file, overwriting any existing file of the same name.
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Lists all filenames with an image suffix, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::DirMissing);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if IMAGE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    /// Reads the named file's bytes.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::DirMissing);
        }

        let path = self.resolve(name)?;
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::FileNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the named file exists. Invalid names simply do not exist.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Removes the named file.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::FileNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Content type inferred from the filename extension.
    pub fn content_type(name: &str) -> &'static str {
        if name.ends_with(".jpg") || name.ends_with(".jpeg") {
            "image/jpeg"
        } else if name.ends_with(".png") {
            "image/png"
        } else {
            "application/octet-stream"
        }
    }
}
