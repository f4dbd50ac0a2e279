use async_trait::async_trait;
use buycut_sdk::{
    Brand, BrandId, BrandWithCompany, Company, CompanyId, CompanyWithBrands, PageWindow, User,
};

use crate::domain::error::DomainError;

/// Column values for a new company row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub proof: Vec<String>,
    pub image_url: String,
}

/// Column values for a new brand row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRecord {
    pub name: String,
    pub slug: String,
    pub image_url: String,
    pub company_id: CompanyId,
}

/// Column values for a new user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Typed partial update for a company. Only `Some` fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub proof: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl CompanyChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.proof.is_none()
            && self.image_url.is_none()
    }
}

/// Typed partial update for a brand. Only `Some` fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrandChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub company_id: Option<CompanyId>,
}

impl BrandChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.image_url.is_none()
            && self.company_id.is_none()
    }
}

/// A user together with the stored password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a company. A name or slug clash yields `Duplicate`.
    async fn create(&self, record: CompanyRecord) -> Result<Company, DomainError>;

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<CompanyWithBrands>, DomainError>;

    /// Companies whose name contains `keyword` (case-insensitive), name ascending,
    /// brands preloaded. `None` lists everything.
    async fn list(
        &self,
        keyword: Option<&str>,
        window: PageWindow,
    ) -> Result<Vec<CompanyWithBrands>, DomainError>;

    async fn count(&self, keyword: Option<&str>) -> Result<u64, DomainError>;

    /// Companies whose name equals `keyword` ignoring case, brands preloaded.
    async fn search_exact(&self, keyword: &str) -> Result<Vec<CompanyWithBrands>, DomainError>;

    /// Substring match on name ignoring case, name ascending.
    async fn search_like(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<Company>, DomainError>;

    async fn count_like(&self, keyword: &str) -> Result<u64, DomainError>;

    /// Id of the company stored under `slug`, if any.
    async fn slug_owner(&self, slug: &str) -> Result<Option<CompanyId>, DomainError>;

    /// Zero rows affected yields `NotFound`.
    async fn update(&self, id: CompanyId, changes: CompanyChanges)
    -> Result<Company, DomainError>;

    /// Delete the company's brands and then the company in one transaction.
    async fn delete_with_brands(&self, id: CompanyId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Insert a brand. An unknown company yields `NotFound("company")`.
    async fn create(&self, record: BrandRecord) -> Result<Brand, DomainError>;

    async fn find_by_id(&self, id: BrandId) -> Result<Option<BrandWithCompany>, DomainError>;

    /// Brands whose name equals `keyword` ignoring case, parent company preloaded.
    async fn search_exact(&self, keyword: &str) -> Result<Vec<BrandWithCompany>, DomainError>;

    /// Substring match on name ignoring case, name ascending, parent company preloaded.
    async fn search_like(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<BrandWithCompany>, DomainError>;

    async fn count_like(&self, keyword: &str) -> Result<u64, DomainError>;

    /// Id of the brand stored under `slug`, if any.
    async fn slug_owner(&self, slug: &str) -> Result<Option<BrandId>, DomainError>;

    async fn update(&self, id: BrandId, changes: BrandChanges) -> Result<Brand, DomainError>;

    async fn delete(&self, id: BrandId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A name or email clash yields `Duplicate`.
    async fn create(&self, record: UserRecord) -> Result<User, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
}
