use async_trait::async_trait;

use super::service::{ImageUpload, MediaError, MediaStore};

/// Media store used when Cloudinary credentials are absent.
///
/// Requests without an image still succeed; any request carrying one fails.
#[derive(Debug, Default, Clone)]
pub struct DisabledMediaStore;

#[async_trait]
impl MediaStore for DisabledMediaStore {
    async fn upload(&self, image: ImageUpload, folder: &str) -> Result<String, MediaError> {
        tracing::warn!(
            file = %image.file_name,
            folder,
            "Image upload attempted but media storage is disabled"
        );
        Err(MediaError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
