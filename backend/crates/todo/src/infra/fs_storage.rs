//! Filesystem Photo Storage
//!
//! Files live flat under `root`; the same directory is served statically
//! under `public_base_url`.

use std::io::ErrorKind;
use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::storage::{PhotoStorage, PhotoUpload, StorageError, file_name_from_url};

#[derive(Debug, Clone)]
pub struct FsPhotoStorage {
    root: PathBuf,
    public_base_url: String,
}

impl FsPhotoStorage {
    /// `public_base_url` is the URL prefix the root is served under,
    /// e.g. `http://localhost:8080/uploads`
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }
}

impl PhotoStorage for FsPhotoStorage {
    async fn store(&self, upload: PhotoUpload) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!("{}{}", Uuid::new_v4(), upload.extension());
        tokio::fs::write(self.root.join(&file_name), &upload.bytes).await?;

        tracing::debug!(file_name = %file_name, size = upload.bytes.len(), "Photo stored");

        Ok(format!("{}/{}", self.public_base_url, file_name))
    }

    async fn remove(&self, url: &str) -> Result<(), StorageError> {
        let file_name = file_name_from_url(&self.public_base_url, url)?;

        match tokio::fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
