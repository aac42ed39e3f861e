use chrono::{DateTime, Utc};
use log::info;
use shared::ImageInfo;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::ALLOWED_EXTENSIONS;

#[derive(Clone)]
pub struct FsStorageService {
    storage_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FsStorageService {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn generate_image_id() -> String {
        let id = Uuid::new_v4().simple().to_string();
        id[..12].to_string()
    }

    /// Writes the upload to `{storage_dir}/{image_id}{extension}`. Ids are
    /// fresh per upload, so an existing file of the same name is overwritten
    /// without an existence check.
    pub async fn save_image(
        &self,
        image_id: &str,
        contents: &[u8],
        extension: &str,
    ) -> Result<PathBuf, StorageError> {
        tokio::fs::create_dir_all(&self.storage_dir).await?;

        let filepath = self.storage_dir.join(format!("{}{}", image_id, extension));
        tokio::fs::write(&filepath, contents).await?;
        info!("Image saved: {} ({} bytes)", filepath.display(), contents.len());

        Ok(filepath)
    }

    /// Resolves an id by probing the allowed extensions in their fixed order.
    /// The filesystem is the only index.
    pub async fn image_path(&self, image_id: &str) -> Option<PathBuf> {
        for extension in ALLOWED_EXTENSIONS {
            let filepath = self.storage_dir.join(format!("{}{}", image_id, extension));
            if tokio::fs::metadata(&filepath).await.is_ok() {
                return Some(filepath);
            }
        }

        None
    }

    pub async fn image_info(&self, image_id: &str) -> Result<Option<ImageInfo>, StorageError> {
        let Some(filepath) = self.image_path(image_id).await else {
            return Ok(None);
        };

        let metadata = tokio::fs::metadata(&filepath).await?;
        // Birth time is unsupported on some filesystems.
        let created = metadata.created().or_else(|_| metadata.modified())?;

        Ok(Some(ImageInfo {
            image_id: image_id.to_string(),
            filename: file_name(&filepath),
            size_bytes: metadata.len(),
            extension: file_suffix(&filepath),
            created_at: DateTime::<Utc>::from(created),
        }))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
