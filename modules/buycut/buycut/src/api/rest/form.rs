//! Buffered `multipart/form-data` bodies.

use std::collections::HashMap;

use axum::extract::Multipart;

use super::error::ApiError;
use crate::domain::images::ImageFile;

/// Name of the file field in create/update forms.
pub const IMAGE_FIELD: &str = "image";

/// Text fields of a multipart body plus the optional image part.
#[derive(Debug, Default)]
pub struct FormFields {
    texts: HashMap<String, Vec<String>>,
    image: Option<ImageFile>,
}

impl FormFields {
    /// Drain a multipart body. Repeated text fields keep every value in order.
    ///
    /// # Errors
    /// Returns a 400 `ApiError` for malformed bodies.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut fields = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_owned();
            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().map(ToOwned::to_owned);
                let bytes = field.bytes().await?;
                if !file_name.is_empty() || !bytes.is_empty() {
                    fields.image = Some(ImageFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            } else {
                let value = field.text().await?;
                fields.texts.entry(name).or_default().push(value);
            }
        }

        Ok(fields)
    }

    /// First value of a text field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Every value of a repeated text field, or `None` if it was not sent.
    #[must_use]
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.texts.get(name).cloned()
    }

    /// Parse an integer field. Missing or blank yields `Ok(None)`.
    ///
    /// # Errors
    /// Returns a 400 `ApiError` when the value is not an integer.
    pub fn int(&self, name: &str) -> Result<Option<i32>, ApiError> {
        match self.text(name).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::bad_request(format!("{name} must be an integer"))),
        }
    }

    /// Like [`Self::int`] but the field must be present.
    ///
    /// # Errors
    /// Returns a 400 `ApiError` when missing or not an integer.
    pub fn required_int(&self, name: &str) -> Result<i32, ApiError> {
        self.int(name)?
            .ok_or_else(|| ApiError::bad_request(format!("{name} is required")))
    }

    pub fn take_image(&mut self) -> Option<ImageFile> {
        self.image.take()
    }

    /// # Errors
    /// Returns a 400 `ApiError` when no image part was sent.
    pub fn require_image(&mut self) -> Result<ImageFile, ApiError> {
        self.take_image()
            .ok_or_else(|| ApiError::bad_request("image file is required"))
    }
}
