//! Request body encoding
//!
//! Writes that carry an image go out as `multipart/form-data`, everything
//! else as JSON. [`Payload::from_dto`] is the single place where that choice
//! is made.

use crate::error::{ApiError, ApiResult};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Form field the backend reads the uploaded file from
pub const IMAGE_FIELD: &str = "image";

/// An image file attached to a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the part
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`
    pub mime: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload from raw bytes
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| IMAGE_FIELD.to_string(), |n| n.to_string_lossy().into_owned());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

/// Text fields plus an optional file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// Text parts in order
    pub fields: Vec<(String, String)>,
    /// File part, sent under [`IMAGE_FIELD`]
    pub file: Option<ImageUpload>,
}

impl MultipartForm {
    /// Value of a text part
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Encoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `application/json`
    Json(Value),
    /// `multipart/form-data`
    Multipart(MultipartForm),
}

impl Payload {
    /// Encode a DTO, switching to multipart when an image is attached
    ///
    /// In multipart mode each non-null top-level field becomes a text part:
    /// strings as-is, numbers and booleans in their plain form, arrays and
    /// objects (such as `openingHours`) as JSON text.
    pub fn from_dto<T: Serialize>(dto: &T, image: Option<ImageUpload>) -> ApiResult<Self> {
        let value = serde_json::to_value(dto)?;

        let Some(file) = image else {
            return Ok(Self::Json(value));
        };

        let Value::Object(map) = value else {
            return Err(ApiError::InvalidResponse(
                "multipart payloads must be built from an object".to_string(),
            ));
        };

        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                nested @ (Value::Array(_) | Value::Object(_)) => serde_json::to_string(&nested)?,
            };
            fields.push((key, text));
        }

        Ok(Self::Multipart(MultipartForm {
            fields,
            file: Some(file),
        }))
    }

    /// Check whether this payload carries a file
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}
