//! Buycut Module Implementation
//!
//! The public contract is defined in `buycut-sdk` and re-exported here.

pub use buycut_sdk::{
    BoycottedKind, BoycottedResult, Brand, BrandPatch, BuycutClient, BuycutError, Company,
    CompanyPatch, KeywordMatch, NewBrand, NewCompany, NewUser, PageRequest, Pages,
};

pub mod module;
pub use module::BuycutModule;

pub mod config;
pub use config::BuycutConfig;

pub mod health;
pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
