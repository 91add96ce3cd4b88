//! Media store trait and upload types.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors returned by a [`MediaStore`].
#[derive(Debug, Error)]
pub enum MediaError {
    /// No media backend is configured.
    #[error("media storage is not configured")]
    Disabled,

    /// Transport-level failure talking to the backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the upload.
    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// An image received from a multipart form, already checked for type and size.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Stores images and returns a public URL for them.
///
/// # Implementations
///
/// - [`crate::infrastructure::media::CloudinaryStore`] - Cloudinary signed uploads
/// - [`crate::infrastructure::media::DisabledMediaStore`] - Rejects every upload
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Uploads `image` into `folder` and returns its `https` URL.
    async fn upload(&self, image: ImageUpload, folder: &str) -> Result<String, MediaError>;

    fn is_enabled(&self) -> bool;
}
