//! Outbound collaborators of the domain: image hosting, tokens, passwords.

use async_trait::async_trait;
use buycut_sdk::UserId;

use crate::domain::error::DomainError;
use crate::domain::images::{ImageFile, UploadTarget};

/// Remote image hosting.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Upload an image and return its public URL.
    async fn upload(&self, image: ImageFile, target: &UploadTarget) -> Result<String, DomainError>;

    /// Delete one asset by its full public id (`folder/slug`).
    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;

    /// Move an asset to a new full public id and return its new URL.
    async fn rename(&self, from: &str, to: &str) -> Result<String, DomainError>;

    /// Delete every asset carrying `tag`.
    async fn delete_all_by_tag(&self, tag: &str) -> Result<(), DomainError>;

    /// Delete an (empty) folder.
    async fn delete_folder(&self, path: &str) -> Result<(), DomainError>;
}

/// Issues signed, time-limited access tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: UserId) -> Result<String, DomainError>;
}

/// Slow, salted one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    async fn verify(&self, plaintext: &str, digest: &str) -> bool;
}
