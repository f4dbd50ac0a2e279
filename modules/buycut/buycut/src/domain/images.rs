//! Image upload rules and storage layout.

use std::path::Path;

use bytes::Bytes;
use buycut_sdk::CompanyId;

use crate::domain::error::DomainError;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// An image received from a client, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Check extension (`.jpg`, `.jpeg`, `.png`, case-insensitive) and size.
///
/// # Errors
/// Returns `DomainError::InvalidImage` when either rule is violated.
pub fn validate_image(image: &ImageFile) -> Result<(), DomainError> {
    let ext = Path::new(&image.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(DomainError::invalid_image(
            "unsupported image file, expected .jpg, .jpeg or .png",
        ));
    }

    if image.size() > MAX_IMAGE_BYTES {
        return Err(DomainError::invalid_image("image must not exceed 1 MB"));
    }

    Ok(())
}

/// Where and how an upload is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub folder: String,
    pub public_id: String,
    pub tag: String,
}

/// Per-company folder layout under a configured root folder.
///
/// Assets live at `{root}/{company_id}/{slug}` and are tagged with the company
/// id so they can be removed in bulk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLayout {
    root_folder: String,
}

impl ImageLayout {
    pub fn new(root_folder: impl Into<String>) -> Self {
        Self {
            root_folder: root_folder.into().trim_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn folder(&self, company_id: CompanyId) -> String {
        format!("{}/{company_id}", self.root_folder)
    }

    #[must_use]
    pub fn public_id(&self, company_id: CompanyId, slug: &str) -> String {
        format!("{}/{slug}", self.folder(company_id))
    }

    #[must_use]
    pub fn tag(company_id: CompanyId) -> String {
        company_id.to_string()
    }

    #[must_use]
    pub fn upload_target(&self, company_id: CompanyId, slug: &str) -> UploadTarget {
        UploadTarget {
            folder: self.folder(company_id),
            public_id: slug.to_owned(),
            tag: Self::tag(company_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        for name in ["a.jpg", "b.JPEG", "c.Png"] {
            assert!(validate_image(&ImageFile::new(name, vec![1, 2, 3])).is_ok());
        }
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["a.gif", "b.webp", "noext", "png"] {
            let err = validate_image(&ImageFile::new(name, vec![1])).unwrap_err();
            assert!(matches!(err, DomainError::InvalidImage { .. }), "{name}");
        }
    }

    #[test]
    fn size_limit_is_inclusive() {
        let at_limit = ImageFile::new("a.png", vec![0u8; MAX_IMAGE_BYTES]);
        assert!(validate_image(&at_limit).is_ok());

        let over = ImageFile::new("a.png", vec![0u8; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(
            validate_image(&over),
            Err(DomainError::InvalidImage { .. })
        ));
    }

    #[test]
    fn layout_paths() {
        let layout = ImageLayout::new("/buycut/");
        assert_eq!(layout.folder(7), "buycut/7");
        assert_eq!(layout.public_id(7, "acme-shoes"), "buycut/7/acme-shoes");
        let target = layout.upload_target(7, "acme-shoes");
        assert_eq!(target.folder, "buycut/7");
        assert_eq!(target.public_id, "acme-shoes");
        assert_eq!(target.tag, "7");
    }
}
