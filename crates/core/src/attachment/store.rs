//! Object storage boundary using Apache OpenDAL.

use opendal::{services, ErrorKind, Operator};
use thiserror::Error;

use praxis_shared::config::StorageConfig;

/// Errors from the attachment store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend could not be initialized.
    #[error("Storage configuration error: {0}")]
    Configuration(String),

    /// The requested object does not exist.
    #[error("Attachment not found: {0}")]
    NotFound(String),

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<opendal::Error> for StoreError {
    fn from(error: opendal::Error) -> Self {
        if error.kind() == ErrorKind::NotFound {
            Self::NotFound(error.to_string())
        } else {
            Self::Backend(error.to_string())
        }
    }
}

/// Vendor-agnostic attachment storage.
///
/// Stores byte streams under the logical paths computed by
/// [`super::attachment_path`]; retrieval and deletion mirror that
/// contract.
pub struct AttachmentStore {
    operator: Operator,
}

impl AttachmentStore {
    /// Builds a store from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` for unknown backends or
    /// invalid settings.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        let operator = match config.backend.as_str() {
            "fs" => {
                let builder = services::Fs::default().root(&config.root);
                Operator::new(builder)
                    .map_err(|e| StoreError::Configuration(e.to_string()))?
                    .finish()
            }
            "s3" => {
                let mut builder = services::S3::default()
                    .bucket(&config.bucket)
                    .root(&config.root);
                if !config.region.is_empty() {
                    builder = builder.region(&config.region);
                }
                if !config.endpoint.is_empty() {
                    builder = builder.endpoint(&config.endpoint);
                }
                Operator::new(builder)
                    .map_err(|e| StoreError::Configuration(e.to_string()))?
                    .finish()
            }
            other => {
                return Err(StoreError::Configuration(format!(
                    "unknown storage backend: {other}"
                )));
            }
        };
        Ok(Self { operator })
    }

    /// Stores a byte stream under a logical path.
    pub async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.operator.write(path, bytes).await?;
        Ok(())
    }

    /// Reads the object at a logical path.
    pub async fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let buffer = self.operator.read(path).await?;
        Ok(buffer.to_vec())
    }

    /// Deletes the object at a logical path, if present.
    pub async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.operator.delete(path).await?;
        Ok(())
    }

    /// Whether an object exists at a logical path.
    pub async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        match self.operator.stat(path).await {
            Ok(_) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}
