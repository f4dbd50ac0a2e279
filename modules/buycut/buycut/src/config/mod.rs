//! Configuration for the buycut module.

pub mod humantime_serde;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::service::ServiceConfig;

/// Configuration for the `buycut` module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuycutConfig {
    pub jwt: JwtConfig,
    pub image_storage: ImageStorageConfig,
    pub health: HealthConfig,
    pub feed: FeedConfig,
}

impl BuycutConfig {
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            image_root_folder: self.image_storage.root_folder.clone(),
            title_case_feed_names: self.feed.title_case_names,
        }
    }

    /// Reject settings the module cannot start with.
    ///
    /// # Errors
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.expose_secret().is_empty() {
            return Err("buycut.jwt.secret must be set".to_owned());
        }
        if self.jwt.access_token_ttl_minutes == 0 {
            return Err("buycut.jwt.access_token_ttl_minutes must be positive".to_owned());
        }
        if self.health.enabled && self.health.interval.is_zero() {
            return Err("buycut.health.interval must be positive".to_owned());
        }
        if self.image_storage.root_folder.trim_matches('/').is_empty() {
            return Err("buycut.image_storage.root_folder must not be empty".to_owned());
        }
        Ok(())
    }
}

/// Access token signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JwtConfig {
    #[serde(serialize_with = "redacted")]
    pub secret: SecretString,
    pub access_token_ttl_minutes: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(String::new()),
            access_token_ttl_minutes: 60,
        }
    }
}

/// Cloudinary account used for logos and brand images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageStorageConfig {
    pub cloud_name: String,
    pub api_key: String,
    #[serde(serialize_with = "redacted")]
    pub api_secret: SecretString,
    /// Top-level folder; each company gets `{root_folder}/{company_id}`.
    pub root_folder: String,
    pub api_base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ImageStorageConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: SecretString::from(String::new()),
            root_folder: "buycut".to_owned(),
            api_base_url: "https://api.cloudinary.com".to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Periodic read-only probe keeping the database connection warm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub probe_company_id: i32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_secs(180),
            probe_company_id: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub title_case_names: bool,
}

/// Serialize a secret as a fixed placeholder, or empty when unset.
fn redacted<S>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if secret.expose_secret().is_empty() {
        s.serialize_str("")
    } else {
        s.serialize_str("***")
    }
}
