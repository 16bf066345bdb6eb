//! Image uploads referenced by file fields.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file was provided in the 'file' field")]
    MissingFile,

    #[error("File type {0} is not allowed")]
    UnsupportedType(String),

    #[error("File exceeds the maximum size of {max} bytes")]
    TooLarge { max: usize },

    #[error("Failed to store file: {0}")]
    Storage(#[from] std::io::Error),
}

/// Destination for accepted uploads.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str)
        -> Result<String, UploadError>;
}

/// Writes files to a local directory served under a public base URL.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(key), bytes).await?;
        tracing::debug!(key, content_type, size = bytes.len(), "Stored upload");
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Size and type limits applied before anything is written.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    /// Content type of an upload: the declared one, or a guess from the file
    /// name when the client sent none or a generic octet stream.
    pub fn content_type(declared: Option<&str>, file_name: Option<&str>) -> Option<String> {
        match declared {
            Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => {
                Some(ct.to_ascii_lowercase())
            }
            _ => file_name
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|mime| mime.essence_str().to_string()),
        }
    }

    pub fn check_type(&self, content_type: Option<&str>) -> Result<String, UploadError> {
        let content_type = content_type.unwrap_or("application/octet-stream");
        let allowed = self.allowed_mime_types.iter().any(|allowed| {
            match allowed.strip_suffix("/*") {
                Some(prefix) => content_type
                    .split_once('/')
                    .is_some_and(|(kind, _)| kind == prefix),
                None => allowed == content_type,
            }
        });
        if allowed {
            Ok(content_type.to_string())
        } else {
            Err(UploadError::UnsupportedType(content_type.to_string()))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size > self.max_file_size_bytes {
            return Err(UploadError::TooLarge {
                max: self.max_file_size_bytes,
            });
        }
        Ok(())
    }
}

/// Fresh storage key for an accepted upload.
pub fn object_key(content_type: &str) -> String {
    let extension = match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        other => mime_guess::get_mime_extensions_str(other)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin"),
    };
    format!("{}.{}", Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UploadPolicy {
        UploadPolicy {
            max_file_size_bytes: 1024,
            allowed_mime_types: vec!["image/png".to_string(), "image/jpeg".to_string()],
        }
    }

    #[test]
    fn test_content_type_prefers_declared() {
        assert_eq!(
            UploadPolicy::content_type(Some("IMAGE/PNG"), Some("a.jpg")).as_deref(),
            Some("image/png")
        );
        assert_eq!(
            UploadPolicy::content_type(Some("application/octet-stream"), Some("a.jpg")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(UploadPolicy::content_type(None, None), None);
    }

    #[test]
    fn test_check_type() {
        let policy = policy();
        assert_eq!(policy.check_type(Some("image/png")).unwrap(), "image/png");
        assert!(matches!(
            policy.check_type(Some("application/pdf")),
            Err(UploadError::UnsupportedType(t)) if t == "application/pdf"
        ));
        assert!(policy.check_type(None).is_err());
    }

    #[test]
    fn test_wildcard_allows_any_image() {
        let policy = UploadPolicy {
            max_file_size_bytes: 10,
            allowed_mime_types: vec!["image/*".to_string()],
        };
        assert!(policy.check_type(Some("image/avif")).is_ok());
        assert!(policy.check_type(Some("text/plain")).is_err());
    }

    #[test]
    fn test_check_size_limit_is_inclusive() {
        let policy = policy();
        assert!(policy.check_size(1024).is_ok());
        assert!(matches!(
            policy.check_size(1025),
            Err(UploadError::TooLarge { max: 1024 })
        ));
    }

    #[test]
    fn test_object_key_extension() {
        assert!(object_key("image/jpeg").ends_with(".jpg"));
        assert!(object_key("image/webp").ends_with(".webp"));
        assert_ne!(object_key("image/png"), object_key("image/png"));
    }

    #[tokio::test]
    async fn test_local_store_writes_and_returns_url() {
        let root = std::env::temp_dir().join(format!("af-uploads-{}", Uuid::new_v4()));
        let store = LocalObjectStore::new(&root, "/uploads/");

        let url = store.put("a.png", b"\x89PNG", "image/png").await.unwrap();
        assert_eq!(url, "/uploads/a.png");
        assert_eq!(tokio::fs::read(root.join("a.png")).await.unwrap(), b"\x89PNG");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
