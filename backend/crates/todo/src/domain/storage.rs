//! Photo Storage Port
//!
//! Blob storage for todo photos. A stored photo is addressed by the public
//! URL returned from [`PhotoStorage::store`]; that URL is what the todo row
//! records and what [`PhotoStorage::remove`] accepts.

use std::fmt;

use thiserror::Error;

/// Maximum extension length kept from the client file name
pub const MAX_EXTENSION_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL not issued by this storage, or it names an unsafe path
    #[error("url not managed by this storage: {0}")]
    ForeignUrl(String),
}

/// Uploaded file as received from the client
#[derive(Clone, Default)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: Option<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name,
            bytes: bytes.into(),
        }
    }

    /// Sanitized extension (with leading dot) from the client file name
    ///
    /// Only ASCII alphanumeric extensions up to [`MAX_EXTENSION_LENGTH`]
    /// characters survive; anything else yields an empty string.
    pub fn extension(&self) -> String {
        let Some((stem, ext)) = self.file_name.as_deref().and_then(|n| n.rsplit_once('.')) else {
            return String::new();
        };

        let valid = !stem.is_empty()
            && !ext.is_empty()
            && ext.len() <= MAX_EXTENSION_LENGTH
            && ext.chars().all(|c| c.is_ascii_alphanumeric());

        if valid {
            format!(".{}", ext.to_ascii_lowercase())
        } else {
            String::new()
        }
    }
}

impl fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Photo storage trait
#[trait_variant::make(PhotoStorage: Send)]
pub trait LocalPhotoStorage {
    /// Persist the upload under a fresh name and return its public URL
    async fn store(&self, upload: PhotoUpload) -> Result<String, StorageError>;

    /// Delete the file behind `url`; a missing file is not an error
    async fn remove(&self, url: &str) -> Result<(), StorageError>;
}

/// Extract the stored file name from a URL issued under `base_url`
///
/// Rejects anything that is not a single plain path segment.
pub fn file_name_from_url<'a>(base_url: &str, url: &'a str) -> Result<&'a str, StorageError> {
    let name = url
        .strip_prefix(base_url)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))?;

    let safe = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    if safe {
        Ok(name)
    } else {
        Err(StorageError::ForeignUrl(url.to_string()))
    }
}
