//! Cloudinary image storage using the signed upload API.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use super::service::{ImageUpload, MediaError, MediaStore};
use crate::config::CloudinaryConfig;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<UploadErrorBody>,
}

#[derive(Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Uploads images to a Cloudinary cloud.
#[derive(Clone)]
pub struct CloudinaryStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStore {
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');

        Ok(Self {
            client,
            upload_url: format!("{}/{}/image/upload", base, config.cloud_name),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }
}

/// Computes a Cloudinary request signature.
///
/// Parameters are sorted by name, joined as `k=v` pairs with `&`, suffixed
/// with the API secret and hashed with SHA-256.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload(&self, image: ImageUpload, folder: &str) -> Result<String, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let size = image.bytes.len();
        let file = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self.client.post(&self.upload_url).multipart(form).send().await?;
        let status = response.status();
        let body: UploadResponse = response.json().await?;

        match (body.secure_url, body.error) {
            (Some(url), _) if status.is_success() => {
                tracing::debug!(folder, size, url = %url, "Image uploaded");
                Ok(url)
            }
            (_, Some(err)) => Err(MediaError::Rejected(err.message)),
            _ => Err(MediaError::Rejected(format!("unexpected status {status}"))),
        }
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_params_is_order_independent() {
        let a = sign_params(&[("timestamp", "1700000000"), ("folder", "users/logos")], "s3cr3t");
        let b = sign_params(&[("folder", "users/logos"), ("timestamp", "1700000000")], "s3cr3t");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_sign_params_matches_manual_digest() {
        let expected = {
            let mut h = Sha256::new();
            h.update(b"folder=f&timestamp=1secret");
            hex::encode(h.finalize())
        };
        assert_eq!(sign_params(&[("timestamp", "1"), ("folder", "f")], "secret"), expected);
    }

    #[test]
    fn test_upload_url_uses_cloud_name() {
        let store = CloudinaryStore::new(&CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            api_base: Some("http://localhost:9999/v1_1/".into()),
        })
        .unwrap();
        assert_eq!(store.upload_url, "http://localhost:9999/v1_1/demo/image/upload");
        assert!(store.is_enabled());
    }
}
