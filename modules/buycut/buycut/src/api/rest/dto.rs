//! REST DTOs.
//!
//! These DTOs have serde and utoipa derives for REST serialization.

use buycut_sdk::{
    BoycottedResult, Brand, BrandWithCompany, Company, CompanyWithBrands, KeywordMatch,
    LoginGrant, NewUser, Pages, User,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

// === Envelopes ===

/// `{message, data}` success body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// `{message, page, data}` body for paginated lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PagedEnvelope<T> {
    pub message: String,
    pub page: PageDto,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    /// Total matching items.
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl From<Pages> for PageDto {
    fn from(p: Pages) -> Self {
        Self {
            total: p.total,
            per_page: p.limit,
            current_page: p.current_page,
            last_page: p.last_page,
        }
    }
}

/// Raw `page`/`limit`/`keyword` query parameters.
///
/// Numbers are kept as strings so unparseable values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub keyword: Option<String>,
}

// === Companies and brands ===

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub proof: Vec<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<BrandDto>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            proof: c.proof,
            image_url: c.image_url,
            brands: None,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<CompanyWithBrands> for CompanyDto {
    fn from(c: CompanyWithBrands) -> Self {
        Self {
            brands: Some(c.brands.into_iter().map(BrandDto::from).collect()),
            ..Self::from(c.company)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub image_url: String,
    pub company_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub company: Option<Box<CompanyDto>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Brand> for BrandDto {
    fn from(b: Brand) -> Self {
        Self {
            id: b.id,
            name: b.name,
            slug: b.slug,
            image_url: b.image_url,
            company_id: b.company_id,
            company: None,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

impl From<BrandWithCompany> for BrandDto {
    fn from(b: BrandWithCompany) -> Self {
        Self {
            company: Some(Box::new(CompanyDto::from(b.company))),
            ..Self::from(b.brand)
        }
    }
}

/// Multipart body of `POST /companies` (documentation only).
#[derive(ToSchema)]
pub struct CompanyForm {
    pub name: String,
    pub description: String,
    /// Repeat the field once per link.
    pub proof: Vec<String>,
    #[schema(format = Binary, value_type = String)]
    pub image: Vec<u8>,
}

/// Multipart body of `PUT /companies` (documentation only).
#[derive(ToSchema)]
pub struct CompanyUpdateForm {
    pub company_id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub proof: Option<Vec<String>>,
    #[schema(format = Binary, value_type = Option<String>)]
    pub image: Option<Vec<u8>>,
}

/// Multipart body of `POST /brands` (documentation only).
#[derive(ToSchema)]
pub struct BrandForm {
    pub company_id: i32,
    pub name: String,
    #[schema(format = Binary, value_type = String)]
    pub image: Vec<u8>,
}

/// Multipart body of `PUT /brands/{id}` (documentation only).
#[derive(ToSchema)]
pub struct BrandUpdateForm {
    pub company_id: Option<i32>,
    pub name: Option<String>,
    #[schema(format = Binary, value_type = Option<String>)]
    pub image: Option<Vec<u8>>,
}

// === Boycott feed ===

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct KeywordRequest {
    pub keyword: String,
}

/// One entry of the merged feed. `type` is `"company"` or `"brand"`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoycottedDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub proof: Vec<String>,
    pub company: Option<CompanyDto>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<BoycottedResult> for BoycottedDto {
    fn from(r: BoycottedResult) -> Self {
        Self {
            id: r.id,
            name: r.name,
            slug: r.slug,
            description: r.description,
            image_url: r.image_url,
            proof: r.proof,
            company: r.company.map(CompanyDto::from),
            kind: r.kind.as_str().to_owned(),
        }
    }
}

/// Exact-match result: either companies (with brands) or brands (with company).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum KeywordMatchDto {
    Companies(Vec<CompanyDto>),
    Brands(Vec<BrandDto>),
}

impl From<KeywordMatch> for KeywordMatchDto {
    fn from(m: KeywordMatch) -> Self {
        match m {
            KeywordMatch::Companies(c) => Self::Companies(c.into_iter().map(Into::into).collect()),
            KeywordMatch::Brands(b) => Self::Brands(b.into_iter().map(Into::into).collect()),
        }
    }
}

// === Users ===

#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(r: RegisterRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            password: r.password,
        }
    }
}

#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub access_token: String,
}

impl From<LoginGrant> for LoginDto {
    fn from(g: LoginGrant) -> Self {
        Self {
            id: g.user.id,
            name: g.user.name,
            email: g.user.email,
            access_token: g.access_token,
        }
    }
}
