//! Boycott feed: keyword search across companies and brands.
//!
//! Two search modes exist. An exact lookup returns either companies or brands,
//! never both. A substring listing queries both tables with a shared offset,
//! tops up the brand query when companies under-fill the page, and merges the
//! rows into one name-ordered feed.

use std::sync::Arc;

use buycut_sdk::{
    BoycottedKind, BoycottedResult, BrandWithCompany, Company, KeywordMatch, PageRequest,
    PageWindow, Paged, Pages,
};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::repo::{BrandRepository, CompanyRepository};
use crate::domain::service::required;
use crate::domain::text::title_case;

/// Brand query limit for a page where the company query returned `rows` rows.
///
/// A full company page leaves the limit as is; otherwise the shortfall is added
/// so the merged page can still fill up.
#[must_use]
pub fn brand_query_limit(rows: u64, limit: u64) -> u64 {
    if rows >= limit {
        limit
    } else {
        limit + (limit - rows)
    }
}

/// Merge company and brand rows into feed entries ordered by raw name.
///
/// The sort is stable, so equal names keep companies ahead of brands. Brands
/// carry their parent company's description and proof.
#[must_use]
pub fn merge_results(
    companies: Vec<Company>,
    brands: Vec<BrandWithCompany>,
) -> Vec<BoycottedResult> {
    let mut merged = Vec::with_capacity(companies.len() + brands.len());

    merged.extend(companies.into_iter().map(|c| BoycottedResult {
        id: c.id,
        name: c.name,
        slug: c.slug,
        description: c.description,
        image_url: c.image_url,
        proof: c.proof,
        company: None,
        kind: BoycottedKind::Company,
    }));

    merged.extend(brands.into_iter().map(|BrandWithCompany { brand, company }| {
        BoycottedResult {
            id: brand.id,
            name: brand.name,
            slug: brand.slug,
            description: company.description.clone(),
            image_url: brand.image_url,
            proof: company.proof.clone(),
            company: Some(company),
            kind: BoycottedKind::Brand,
        }
    }));

    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

#[derive(Clone)]
pub struct FeedService {
    companies: Arc<dyn CompanyRepository>,
    brands: Arc<dyn BrandRepository>,
    title_case_names: bool,
}

impl FeedService {
    #[must_use]
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        brands: Arc<dyn BrandRepository>,
        title_case_names: bool,
    ) -> Self {
        Self {
            companies,
            brands,
            title_case_names,
        }
    }

    /// Exact, case-insensitive name lookup. Companies win over brands.
    #[instrument(skip(self))]
    pub async fn find_by_keyword(&self, keyword: &str) -> Result<KeywordMatch, DomainError> {
        let keyword = required("keyword", keyword)?;

        let companies = self.companies.search_exact(&keyword).await?;
        if !companies.is_empty() {
            debug!(matches = companies.len(), "Keyword matched companies");
            return Ok(KeywordMatch::Companies(companies));
        }

        let brands = self.brands.search_exact(&keyword).await?;
        if !brands.is_empty() {
            debug!(matches = brands.len(), "Keyword matched brands");
            return Ok(KeywordMatch::Brands(brands));
        }

        Err(DomainError::not_found("boycotted item", keyword))
    }

    /// One merged page of substring matches.
    #[instrument(skip(self), fields(offset = window.offset, limit = window.limit))]
    pub async fn find_all(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<BoycottedResult>, DomainError> {
        let keyword = keyword.trim();

        let companies = self.companies.search_like(keyword, window).await?;
        let rows = u64::try_from(companies.len()).unwrap_or(u64::MAX);

        let brand_window = PageWindow {
            offset: window.offset,
            limit: brand_query_limit(rows, window.limit),
        };
        let brands = self.brands.search_like(keyword, brand_window).await?;
        debug!(
            companies = companies.len(),
            brands = brands.len(),
            brand_limit = brand_window.limit,
            "Fetched feed rows"
        );

        let mut merged = merge_results(companies, brands);
        if self.title_case_names {
            for item in &mut merged {
                item.name = title_case(&item.name);
            }
        }
        Ok(merged)
    }

    /// Matching companies plus matching brands, counted independently.
    #[instrument(skip(self))]
    pub async fn count_all(&self, keyword: &str) -> Result<u64, DomainError> {
        let keyword = keyword.trim();
        let companies = self.companies.count_like(keyword).await?;
        let brands = self.brands.count_like(keyword).await?;
        Ok(companies.saturating_add(brands))
    }

    /// Paginated boycott feed: total from [`Self::count_all`], rows from
    /// [`Self::find_all`].
    #[instrument(skip(self), fields(page = page.page, limit = page.limit))]
    pub async fn feed(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Paged<BoycottedResult>, DomainError> {
        let total = self.count_all(keyword).await?;
        let pages = Pages::from_request(page, i64::try_from(total).unwrap_or(i64::MAX));
        let items = self.find_all(keyword, pages.window()).await?;
        Ok(Paged { pages, items })
    }
}
