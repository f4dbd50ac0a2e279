//! Cloudinary-backed [`ImageStorage`].
//!
//! Uploads and single-asset deletes go through the signed upload API
//! (`/v1_1/{cloud}/image/...`); bulk deletes by tag and folder removal use the
//! admin API with basic auth.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};

use crate::config::ImageStorageConfig;
use crate::domain::error::DomainError;
use crate::domain::images::{ImageFile, UploadTarget};
use crate::domain::ports::ImageStorage;

const SIGNATURE_ALGORITHM: &str = "sha256";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryImageStorage {
    client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: SecretString,
}

impl CloudinaryImageStorage {
    /// Build a client from the module configuration.
    ///
    /// # Errors
    /// Returns `DomainError::ImageStorage` if the HTTP client cannot be built.
    pub fn new(cfg: &ImageStorageConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| DomainError::image_storage(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: cfg.api_base_url.trim_end_matches('/').to_owned(),
            cloud_name: cfg.cloud_name.clone(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1_1/{}/{path}", self.base_url, self.cloud_name)
    }

    /// Sign request parameters: sorted `key=value` pairs joined by `&`, with
    /// the API secret appended, hashed with SHA-256.
    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
        sorted.sort_unstable_by_key(|(k, _)| *k);

        let joined = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.api_secret.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// URL-encoded body for the signed upload API endpoints.
    fn signed_form(&self, params: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let signature = self.sign(params);
        let mut form = params.to_vec();
        form.push(("api_key", self.api_key.clone()));
        form.push(("signature", signature));
        form.push(("signature_algorithm", SIGNATURE_ALGORITHM.to_owned()));
        form
    }

    async fn admin_delete(&self, path: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.url(path))
            .basic_auth(&self.api_key, Some(self.api_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| transport_err(&e))?;

        check_status(response).await.map(drop)
    }
}

fn transport_err(err: &reqwest::Error) -> DomainError {
    DomainError::image_storage(format!("request failed: {err}"))
}

async fn check_status(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DomainError::image_storage(format!(
        "cloudinary returned {status}: {body}"
    )))
}

fn unix_now() -> String {
    OffsetDateTime::now_utc().unix_timestamp().to_string()
}

#[async_trait]
impl ImageStorage for CloudinaryImageStorage {
    #[instrument(skip(self, image), fields(folder = %target.folder, public_id = %target.public_id))]
    async fn upload(&self, image: ImageFile, target: &UploadTarget) -> Result<String, DomainError> {
        let params = [
            ("folder", target.folder.clone()),
            ("overwrite", "true".to_owned()),
            ("public_id", target.public_id.clone()),
            ("tags", target.tag.clone()),
            ("timestamp", unix_now()),
        ];
        let signature = self.sign(&params);

        let mut part = Part::stream(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| DomainError::invalid_image(format!("content type: {e}")))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", SIGNATURE_ALGORITHM);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.url("image/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_err(&e))?;

        let uploaded: UploadResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::image_storage(format!("upload response: {e}")))?;

        debug!(url = %uploaded.secure_url, "Image uploaded");
        Ok(uploaded.secure_url)
    }

    #[instrument(skip(self))]
    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let params = [
            ("public_id", public_id.to_owned()),
            ("timestamp", unix_now()),
        ];
        let form = self.signed_form(&params);

        let response = self
            .client
            .post(self.url("image/destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| transport_err(&e))?;

        let destroyed: DestroyResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::image_storage(format!("destroy response: {e}")))?;

        match destroyed.result.as_str() {
            "ok" => Ok(()),
            "not found" => {
                warn!(public_id, "Image was already gone");
                Ok(())
            }
            other => Err(DomainError::image_storage(format!(
                "destroy returned {other}"
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn rename(&self, from: &str, to: &str) -> Result<String, DomainError> {
        let params = [
            ("from_public_id", from.to_owned()),
            ("overwrite", "true".to_owned()),
            ("timestamp", unix_now()),
            ("to_public_id", to.to_owned()),
        ];
        let form = self.signed_form(&params);

        let response = self
            .client
            .post(self.url("image/rename"))
            .form(&form)
            .send()
            .await
            .map_err(|e| transport_err(&e))?;

        let renamed: UploadResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::image_storage(format!("rename response: {e}")))?;

        debug!(url = %renamed.secure_url, "Image renamed");
        Ok(renamed.secure_url)
    }

    #[instrument(skip(self))]
    async fn delete_all_by_tag(&self, tag: &str) -> Result<(), DomainError> {
        self.admin_delete(&format!("resources/image/tags/{tag}"))
            .await
    }

    #[instrument(skip(self))]
    async fn delete_folder(&self, path: &str) -> Result<(), DomainError> {
        self.admin_delete(&format!("folders/{path}")).await
    }
}
