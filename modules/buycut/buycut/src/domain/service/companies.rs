use std::sync::Arc;

use buycut_sdk::{
    Company, CompanyId, CompanyPatch, CompanyWithBrands, NewCompany, PageRequest, Paged, Pages,
};
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::images::{ImageFile, ImageLayout, validate_image};
use crate::domain::ports::ImageStorage;
use crate::domain::repo::{CompanyChanges, CompanyRecord, CompanyRepository};
use crate::domain::service::assets::AssetUpdate;
use crate::domain::service::required;
use crate::domain::text::slugify;

/// Company lifecycle: lookups, creation with image upload, patching and deletion.
#[derive(Clone)]
pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
    images: Arc<dyn ImageStorage>,
    layout: ImageLayout,
}

impl CompanyService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn CompanyRepository>,
        images: Arc<dyn ImageStorage>,
        layout: ImageLayout,
    ) -> Self {
        Self {
            repo,
            images,
            layout,
        }
    }

    #[instrument(skip(self), fields(company_id = id))]
    pub async fn get(&self, id: CompanyId) -> Result<CompanyWithBrands, DomainError> {
        debug!("Getting company by id");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("company", id))
    }

    /// Page through companies, optionally filtered by a name substring.
    #[instrument(skip(self), fields(keyword = ?keyword, page = page.page, limit = page.limit))]
    pub async fn list(
        &self,
        keyword: Option<&str>,
        page: PageRequest,
    ) -> Result<Paged<CompanyWithBrands>, DomainError> {
        debug!("Listing companies");
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

        let total = self.repo.count(keyword).await?;
        let pages = Pages::from_request(page, i64::try_from(total).unwrap_or(i64::MAX));
        let items = self.repo.list(keyword, pages.window()).await?;

        debug!(total, returned = items.len(), "Listed companies");
        Ok(Paged { pages, items })
    }

    /// Create a company and attach its logo.
    ///
    /// The row goes in first because the image folder is keyed by the new id.
    /// A failed upload removes the row again.
    #[instrument(skip(self, new, image), fields(name = %new.name, file = %image.file_name))]
    pub async fn create(&self, new: NewCompany, image: ImageFile) -> Result<Company, DomainError> {
        info!("Creating company");

        let name = required("name", &new.name)?;
        let description = required("description", &new.description)?;
        let proof = normalize_proof(new.proof);
        if proof.is_empty() {
            return Err(DomainError::validation("proof", "must not be empty"));
        }
        validate_image(&image)?;

        let slug = slugify(&name);
        let company = self
            .repo
            .create(CompanyRecord {
                name,
                slug,
                description,
                proof,
                image_url: String::new(),
            })
            .await?;

        let target = self.layout.upload_target(company.id, &company.slug);
        let url = match self.images.upload(image, &target).await {
            Ok(url) => url,
            Err(e) => {
                self.discard_row(company.id).await;
                return Err(e);
            }
        };

        let changes = CompanyChanges {
            image_url: Some(url),
            ..CompanyChanges::default()
        };
        match self.repo.update(company.id, changes).await {
            Ok(company) => {
                info!(company_id = company.id, "Company created");
                Ok(company)
            }
            Err(e) => {
                self.discard_image(&self.layout.public_id(company.id, &company.slug))
                    .await;
                self.discard_row(company.id).await;
                Err(e)
            }
        }
    }

    /// Apply a partial update, optionally replacing the image.
    ///
    /// The logo follows the slug: a rename moves the stored asset (or uploads
    /// the new image under the new slug). The old asset is removed only after
    /// the row update succeeds.
    #[instrument(skip(self, patch, image), fields(company_id = id, has_image = image.is_some()))]
    pub async fn update(
        &self,
        id: CompanyId,
        patch: CompanyPatch,
        image: Option<ImageFile>,
    ) -> Result<Company, DomainError> {
        info!("Updating company");

        if patch.is_empty() && image.is_none() {
            return Err(DomainError::validation("company", "no fields to update"));
        }
        if let Some(image) = &image {
            validate_image(image)?;
        }

        let current = self.get(id).await?.company;
        let mut changes = CompanyChanges::default();

        if let Some(name) = patch.name {
            let name = required("name", &name)?;
            changes.slug = Some(slugify(&name));
            changes.name = Some(name);
        }
        if let Some(description) = patch.description {
            changes.description = Some(required("description", &description)?);
        }
        if let Some(proof) = patch.proof {
            let proof = normalize_proof(proof);
            if proof.is_empty() {
                return Err(DomainError::validation("proof", "must not be empty"));
            }
            changes.proof = Some(proof);
        }

        let slug = changes.slug.clone().unwrap_or_else(|| current.slug.clone());
        if slug != current.slug
            && self
                .repo
                .slug_owner(&slug)
                .await?
                .is_some_and(|owner| owner != id)
        {
            return Err(DomainError::duplicate("company"));
        }

        let mut asset = AssetUpdate::new(
            self.images.as_ref(),
            self.layout.public_id(id, &current.slug),
            self.layout.public_id(id, &slug),
        );
        let target = self.layout.upload_target(id, &slug);
        if let Some(url) = asset.apply(image, &target).await? {
            changes.image_url = Some(url);
        }

        match self.repo.update(id, changes).await {
            Ok(company) => {
                asset.commit().await;
                info!("Company updated");
                Ok(company)
            }
            Err(e) => {
                asset.rollback().await;
                Err(e)
            }
        }
    }

    /// Delete a company with its brands, then clean up its image folder.
    #[instrument(skip(self), fields(company_id = id))]
    pub async fn delete(&self, id: CompanyId) -> Result<(), DomainError> {
        info!("Deleting company");

        self.repo.delete_with_brands(id).await?;

        if let Err(e) = self
            .images
            .delete_all_by_tag(&ImageLayout::tag(id))
            .await
        {
            warn!(error = %e, "Failed to delete company images");
        } else if let Err(e) = self.images.delete_folder(&self.layout.folder(id)).await {
            warn!(error = %e, "Failed to delete company image folder");
        }

        info!("Company deleted");
        Ok(())
    }

    async fn discard_row(&self, id: CompanyId) {
        if let Err(e) = self.repo.delete_with_brands(id).await {
            warn!(company_id = id, error = %e, "Failed to remove company after image failure");
        }
    }

    async fn discard_image(&self, public_id: &str) {
        if let Err(e) = self.images.delete(public_id).await {
            warn!(public_id, error = %e, "Failed to delete stale image");
        }
    }
}

fn normalize_proof(proof: Vec<String>) -> Vec<String> {
    proof
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect()
}
