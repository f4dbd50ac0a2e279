//! Public models for the buycut module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the buycut module and its consumers.

use time::OffsetDateTime;

use crate::pagination::Pages;

pub type CompanyId = i32;
pub type BrandId = i32;
pub type UserId = i32;

/// A company flagged for boycott.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Links or citations backing the boycott, in submission order.
    pub proof: Vec<String>,
    pub image_url: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A brand or product owned by exactly one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    pub image_url: String,
    pub company_id: CompanyId,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A company with its brands preloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyWithBrands {
    pub company: Company,
    pub brands: Vec<Brand>,
}

/// A brand with its parent company preloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandWithCompany {
    pub brand: Brand,
    pub company: Company,
}

/// A registered account. The password digest never leaves the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

/// Data for creating a new company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub description: String,
    pub proof: Vec<String>,
}

/// Partial update data for a company. `None` leaves the column untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub proof: Option<Vec<String>>,
}

impl CompanyPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.proof.is_none()
    }
}

/// Data for creating a new brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    pub name: String,
    pub company_id: CompanyId,
}

/// Partial update data for a brand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrandPatch {
    pub name: Option<String>,
    pub company_id: Option<CompanyId>,
}

impl BrandPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.company_id.is_none()
    }
}

/// Data for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A successful login: the account and a signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub user: User,
    pub access_token: String,
}

/// Discriminant of a boycott feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoycottedKind {
    Company,
    Brand,
}

impl BoycottedKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Brand => "brand",
        }
    }
}

/// One entry of the merged boycott feed.
///
/// Brand entries carry their parent company's description and proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoycottedResult {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub proof: Vec<String>,
    pub company: Option<Company>,
    pub kind: BoycottedKind,
}

/// Result of an exact keyword lookup. Never mixes both kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordMatch {
    Companies(Vec<CompanyWithBrands>),
    Brands(Vec<BrandWithCompany>),
}

/// A page of items with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub pages: Pages,
    pub items: Vec<T>,
}
