use std::sync::Arc;

use buycut_sdk::{Brand, BrandId, BrandPatch, BrandWithCompany, CompanyId, NewBrand};
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::images::{ImageFile, ImageLayout, validate_image};
use crate::domain::ports::ImageStorage;
use crate::domain::repo::{BrandChanges, BrandRecord, BrandRepository, CompanyRepository};
use crate::domain::service::assets::AssetUpdate;
use crate::domain::service::required;
use crate::domain::text::slugify;

/// Brand lifecycle. Every brand belongs to an existing company and its image
/// lives in that company's folder.
#[derive(Clone)]
pub struct BrandService {
    brands: Arc<dyn BrandRepository>,
    companies: Arc<dyn CompanyRepository>,
    images: Arc<dyn ImageStorage>,
    layout: ImageLayout,
}

impl BrandService {
    #[must_use]
    pub fn new(
        brands: Arc<dyn BrandRepository>,
        companies: Arc<dyn CompanyRepository>,
        images: Arc<dyn ImageStorage>,
        layout: ImageLayout,
    ) -> Self {
        Self {
            brands,
            companies,
            images,
            layout,
        }
    }

    #[instrument(skip(self), fields(brand_id = id))]
    pub async fn get(&self, id: BrandId) -> Result<BrandWithCompany, DomainError> {
        debug!("Getting brand by id");
        self.brands
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("brand", id))
    }

    #[instrument(skip(self, new, image), fields(name = %new.name, company_id = new.company_id))]
    pub async fn create(&self, new: NewBrand, image: ImageFile) -> Result<Brand, DomainError> {
        info!("Creating brand");

        let name = required("name", &new.name)?;
        validate_image(&image)?;
        self.ensure_company(new.company_id).await?;

        let slug = slugify(&name);
        if self.brands.slug_owner(&slug).await?.is_some() {
            return Err(DomainError::duplicate("brand"));
        }
        let target = self.layout.upload_target(new.company_id, &slug);
        let image_url = self.images.upload(image, &target).await?;

        let record = BrandRecord {
            name,
            slug: slug.clone(),
            image_url,
            company_id: new.company_id,
        };
        match self.brands.create(record).await {
            Ok(brand) => {
                info!(brand_id = brand.id, "Brand created");
                Ok(brand)
            }
            Err(e) => {
                self.discard_image(&self.layout.public_id(new.company_id, &slug))
                    .await;
                Err(e)
            }
        }
    }

    /// Apply a partial update, optionally replacing the image.
    ///
    /// The image follows the slug: a rename moves the stored asset (or uploads
    /// the new image under the new slug). A move to another company needs a
    /// new image, which is stored in that company's folder. The old asset is
    /// removed only after the row update succeeds.
    #[instrument(skip(self, patch, image), fields(brand_id = id, has_image = image.is_some()))]
    pub async fn update(
        &self,
        id: BrandId,
        patch: BrandPatch,
        image: Option<ImageFile>,
    ) -> Result<Brand, DomainError> {
        info!("Updating brand");

        if patch.is_empty() && image.is_none() {
            return Err(DomainError::validation("brand", "no fields to update"));
        }
        if let Some(image) = &image {
            validate_image(image)?;
        }

        let current = self.get(id).await?.brand;
        let mut changes = BrandChanges::default();

        if let Some(name) = patch.name {
            let name = required("name", &name)?;
            changes.slug = Some(slugify(&name));
            changes.name = Some(name);
        }
        if let Some(company_id) = patch.company_id {
            if company_id != current.company_id {
                if image.is_none() {
                    return Err(DomainError::validation(
                        "image",
                        "a new image is required when moving a brand to another company",
                    ));
                }
                self.ensure_company(company_id).await?;
            }
            changes.company_id = Some(company_id);
        }

        let company_id = changes.company_id.unwrap_or(current.company_id);
        let slug = changes.slug.clone().unwrap_or_else(|| current.slug.clone());
        if slug != current.slug
            && self
                .brands
                .slug_owner(&slug)
                .await?
                .is_some_and(|owner| owner != id)
        {
            return Err(DomainError::duplicate("brand"));
        }

        let mut asset = AssetUpdate::new(
            self.images.as_ref(),
            self.layout.public_id(current.company_id, &current.slug),
            self.layout.public_id(company_id, &slug),
        );
        let target = self.layout.upload_target(company_id, &slug);
        if let Some(url) = asset.apply(image, &target).await? {
            changes.image_url = Some(url);
        }

        match self.brands.update(id, changes).await {
            Ok(brand) => {
                asset.commit().await;
                info!("Brand updated");
                Ok(brand)
            }
            Err(e) => {
                asset.rollback().await;
                Err(e)
            }
        }
    }

    /// Delete the brand row, then its image.
    #[instrument(skip(self), fields(brand_id = id))]
    pub async fn delete(&self, id: BrandId) -> Result<(), DomainError> {
        info!("Deleting brand");

        let current = self.get(id).await?.brand;
        self.brands.delete(id).await?;
        self.discard_image(&self.layout.public_id(current.company_id, &current.slug))
            .await;

        info!("Brand deleted");
        Ok(())
    }

    async fn ensure_company(&self, company_id: CompanyId) -> Result<(), DomainError> {
        match self.companies.find_by_id(company_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("company", company_id)),
        }
    }

    async fn discard_image(&self, public_id: &str) {
        if let Err(e) = self.images.delete(public_id).await {
            warn!(public_id, error = %e, "Failed to delete brand image");
        }
    }
}
