use std::path::PathBuf;

use async_trait::async_trait;
use models::todo::Todo;
use tokio::fs;

use super::TodoStore;
use crate::errors::ServiceError;

const EMPTY_COLLECTION: &[u8] = b"[]";

/// JSON file-backed todo collection.
///
/// The file holds one pretty-printed JSON array. Writes overwrite the file in
/// place with no temp-file-and-rename step, so a crash mid-write can leave a
/// truncated file behind.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    async fn ensure_dir(&self) -> Result<(), ServiceError> {
        let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if !fs::try_exists(parent).await.map_err(|e| ServiceError::io(parent, e))? {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::io(parent, e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for JsonFileStore {
    async fn ensure(&self) -> Result<(), ServiceError> {
        self.ensure_dir().await?;
        if !fs::try_exists(&self.file_path)
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))?
        {
            fs::write(&self.file_path, EMPTY_COLLECTION)
                .await
                .map_err(|e| ServiceError::io(&self.file_path, e))?;
            tracing::debug!(path = %self.file_path.display(), "initialized empty todo store");
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Todo>, ServiceError> {
        self.ensure().await?;
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::json(&self.file_path, e))
    }

    async fn write_all(&self, todos: &[Todo]) -> Result<(), ServiceError> {
        self.ensure_dir().await?;
        let data = serde_json::to_vec_pretty(todos).map_err(|e| ServiceError::json(&self.file_path, e))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))?;
        Ok(())
    }
}
