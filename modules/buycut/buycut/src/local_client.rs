//! Local client implementing the `BuycutClient` trait.

use std::sync::Arc;

use async_trait::async_trait;
use buycut_sdk::{
    BoycottedResult, BuycutClient, BuycutError, CompanyId, CompanyWithBrands, KeywordMatch,
    PageRequest, Paged,
};

use crate::domain::service::AppServices;

/// In-process client delegating to the domain services.
///
/// Used by the health job and by anything embedding the module that should
/// not go through HTTP.
pub struct BuycutLocalClient {
    services: Arc<AppServices>,
}

impl BuycutLocalClient {
    #[must_use]
    pub fn new(services: Arc<AppServices>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl BuycutClient for BuycutLocalClient {
    async fn get_company(&self, id: CompanyId) -> Result<CompanyWithBrands, BuycutError> {
        self.services
            .companies
            .get(id)
            .await
            .map_err(BuycutError::from)
    }

    async fn find_by_keyword(&self, keyword: &str) -> Result<KeywordMatch, BuycutError> {
        self.services
            .feed
            .find_by_keyword(keyword)
            .await
            .map_err(BuycutError::from)
    }

    async fn boycott_feed(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Paged<BoycottedResult>, BuycutError> {
        self.services
            .feed
            .feed(keyword, page)
            .await
            .map_err(BuycutError::from)
    }
}
