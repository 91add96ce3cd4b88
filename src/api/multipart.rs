//! Multipart form reading for endpoints that accept an image upload.
//!
//! Text parts are collected by name. At most one file part is read, from the
//! field the endpoint names; its size is enforced while streaming so an
//! oversized upload is rejected before it is fully buffered.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use bytes::{Bytes, BytesMut};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::entities::Location;
use crate::error::AppError;
use crate::infrastructure::media::ImageUpload;

/// Largest accepted profile or store logo.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Largest accepted product or service image.
pub const MAX_LISTING_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];
const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "webp"];

/// A parsed multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl MultipartForm {
    /// Reads every part of `multipart`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PayloadTooLarge`] if the image exceeds `max_image_bytes`
    /// and [`AppError::Validation`] for a malformed body or a file that is not
    /// a jpeg, png or webp image.
    pub async fn read(
        mut multipart: Multipart,
        image_field: &str,
        max_image_bytes: usize,
    ) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                if name != image_field {
                    tracing::debug!(field = %name, "Ignoring unexpected file part");
                    continue;
                }
                form.image = read_image(field, max_image_bytes).await?;
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Trimmed value of a text part; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }

    pub fn decimal(&self, name: &str) -> Result<Option<Decimal>, AppError> {
        self.parsed(name, "a number")
    }

    pub fn integer(&self, name: &str) -> Result<Option<i32>, AppError> {
        self.parsed(name, "a whole number")
    }

    /// Store location, either as a JSON `location` part or as separate
    /// `city`, `state`, `longitude` and `latitude` parts.
    pub fn location(&self) -> Result<Option<Location>, AppError> {
        if let Some(raw) = self.text("location") {
            return serde_json::from_str::<Location>(&raw).map(Some).map_err(|e| {
                AppError::bad_request(
                    "Invalid location",
                    json!({ "field": "location", "reason": e.to_string() }),
                )
            });
        }

        let city = self.text("city");
        let state = self.text("state");
        let longitude = self.parsed::<f64>("longitude", "a number")?;
        let latitude = self.parsed::<f64>("latitude", "a number")?;
        let coordinates = match (longitude, latitude) {
            (Some(lng), Some(lat)) => Some([lng, lat]),
            _ => None,
        };

        if city.is_none() && state.is_none() && coordinates.is_none() {
            return Ok(None);
        }

        Ok(Some(Location {
            city,
            state,
            coordinates,
        }))
    }

    fn parsed<T: FromStr>(&self, name: &str, expected: &str) -> Result<Option<T>, AppError> {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| {
                    AppError::bad_request(
                        format!("{name} must be {expected}"),
                        json!({ "field": name, "value": raw }),
                    )
                })
            })
            .transpose()
    }
}

async fn read_image(
    mut field: Field<'_>,
    max_bytes: usize,
) -> Result<Option<ImageUpload>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_ascii_lowercase();

    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buf.len() + chunk.len() > max_bytes {
            return Err(AppError::payload_too_large(
                "File too large",
                json!({ "max_bytes": max_bytes }),
            ));
        }
        buf.extend_from_slice(&chunk);
    }

    // Browsers send an empty part when no file was picked.
    if file_name.is_empty() && buf.is_empty() {
        return Ok(None);
    }

    if !is_allowed_image(&file_name, &content_type) {
        return Err(AppError::bad_request(
            "Only image files are allowed (jpeg, jpg, png, webp)",
            json!({ "file_name": file_name, "content_type": content_type }),
        ));
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: Bytes::from(buf),
    }))
}

/// Both the declared type and the file extension must name an allowed format.
fn is_allowed_image(file_name: &str, content_type: &str) -> bool {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    ALLOWED_TYPES.contains(&content_type) && ALLOWED_EXTENSIONS.contains(&extension.as_str())
}

fn multipart_error(e: MultipartError) -> AppError {
    let status = e.status();
    if status == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::payload_too_large("Request body too large", json!({}));
    }
    AppError::bad_request(
        "Invalid multipart body",
        json!({ "reason": e.body_text() }),
    )
}
