//! `BuycutClient` trait definition.
//!
//! In-process API of the buycut module, used by background jobs and other
//! modules that should not go through HTTP.

use async_trait::async_trait;

use crate::errors::BuycutError;
use crate::models::{BoycottedResult, CompanyId, CompanyWithBrands, KeywordMatch, Paged};
use crate::pagination::PageRequest;

#[async_trait]
pub trait BuycutClient: Send + Sync {
    /// Get a company with its brands.
    async fn get_company(&self, id: CompanyId) -> Result<CompanyWithBrands, BuycutError>;

    /// Exact, case-insensitive name lookup across companies and brands.
    async fn find_by_keyword(&self, keyword: &str) -> Result<KeywordMatch, BuycutError>;

    /// Merged, name-sorted boycott feed for a substring keyword.
    async fn boycott_feed(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Paged<BoycottedResult>, BuycutError>;
}
