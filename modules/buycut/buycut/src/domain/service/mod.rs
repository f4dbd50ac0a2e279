//! Application services of the buycut module.

use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::images::ImageLayout;
use crate::domain::ports::{ImageStorage, PasswordHasher, TokenIssuer};
use crate::domain::repo::{BrandRepository, CompanyRepository, UserRepository};

mod assets;
mod brands;
mod companies;
mod feed;
mod users;

#[cfg(test)]
mod feed_test;

pub use brands::BrandService;
pub use companies::CompanyService;
pub use feed::{FeedService, brand_query_limit, merge_results};
pub use users::UserService;

/// Configuration for the domain services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root folder for uploaded images; each company gets a sub-folder.
    pub image_root_folder: String,
    /// Title-case names in the boycott feed after sorting.
    pub title_case_feed_names: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            image_root_folder: "buycut".to_owned(),
            title_case_feed_names: false,
        }
    }
}

/// Collaborators shared by all services.
#[derive(Clone)]
pub struct Collaborators {
    pub companies: Arc<dyn CompanyRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub users: Arc<dyn UserRepository>,
    pub images: Arc<dyn ImageStorage>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// All services of the module, built once at startup and shared by handlers.
#[derive(Clone)]
pub struct AppServices {
    pub companies: CompanyService,
    pub brands: BrandService,
    pub feed: FeedService,
    pub users: UserService,
}

impl AppServices {
    #[must_use]
    pub fn new(deps: Collaborators, config: &ServiceConfig) -> Self {
        let layout = ImageLayout::new(config.image_root_folder.clone());
        Self {
            companies: CompanyService::new(
                deps.companies.clone(),
                deps.images.clone(),
                layout.clone(),
            ),
            brands: BrandService::new(
                deps.brands.clone(),
                deps.companies.clone(),
                deps.images,
                layout,
            ),
            feed: FeedService::new(deps.companies, deps.brands, config.title_case_feed_names),
            users: UserService::new(deps.users, deps.hasher, deps.tokens),
        }
    }
}

/// Trim a required text field, rejecting blank input.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_owned())
}
