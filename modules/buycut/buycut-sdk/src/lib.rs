//! Buycut SDK
//!
//! This crate provides the public contract of the `buycut` module:
//! - `BuycutClient` trait
//! - Model types for companies, brands, users and the boycott feed
//! - The pagination calculator (`Pages`)
//! - Error type (`BuycutError`)
//!
//! ## Usage
//!
//! ```ignore
//! use buycut_sdk::BuycutClient;
//!
//! let company = client.get_company(1).await?;
//! let feed = client.boycott_feed("acme", PageRequest::default()).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;
pub mod pagination;

pub use client::BuycutClient;
pub use errors::BuycutError;
pub use models::{
    BoycottedKind, BoycottedResult, Brand, BrandId, BrandPatch, BrandWithCompany, Company,
    CompanyId, CompanyPatch, CompanyWithBrands, KeywordMatch, LoginGrant, NewBrand, NewCompany,
    NewUser, Paged, User, UserId,
};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageWindow, Pages};
