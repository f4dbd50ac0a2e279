//! Keeping a stored image at `{folder}/{slug}` while its row is updated.

use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::images::{ImageFile, UploadTarget};
use crate::domain::ports::ImageStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Untouched,
    Uploaded,
    Renamed,
}

/// Image side of a row update.
///
/// Storage is changed before the row, and the old asset is only removed once
/// the row points at the new one. A failed row update undoes the storage step.
pub struct AssetUpdate<'a> {
    images: &'a dyn ImageStorage,
    stale: String,
    fresh: String,
    step: Step,
}

impl<'a> AssetUpdate<'a> {
    /// `stale` is where the asset lives now, `fresh` where it belongs after
    /// the update.
    pub fn new(images: &'a dyn ImageStorage, stale: String, fresh: String) -> Self {
        Self {
            images,
            stale,
            fresh,
            step: Step::Untouched,
        }
    }

    fn relocated(&self) -> bool {
        self.stale != self.fresh
    }

    /// Upload `image` to `target`, or move the current asset when only its
    /// location changes. Returns the URL to store, if it changed.
    ///
    /// # Errors
    /// Returns the storage error; nothing has been changed in that case.
    pub async fn apply(
        &mut self,
        image: Option<ImageFile>,
        target: &UploadTarget,
    ) -> Result<Option<String>, DomainError> {
        match image {
            Some(image) => {
                let url = self.images.upload(image, target).await?;
                self.step = Step::Uploaded;
                Ok(Some(url))
            }
            None if self.relocated() => {
                let url = self.images.rename(&self.stale, &self.fresh).await?;
                self.step = Step::Renamed;
                Ok(Some(url))
            }
            None => Ok(None),
        }
    }

    /// The row now references the fresh asset: drop the stale one.
    pub async fn commit(self) {
        if self.step == Step::Uploaded && self.relocated() {
            self.discard(&self.stale).await;
        }
    }

    /// The row update failed: put storage back the way the row expects it.
    pub async fn rollback(self) {
        match self.step {
            Step::Uploaded if self.relocated() => self.discard(&self.fresh).await,
            Step::Renamed => {
                if let Err(e) = self.images.rename(&self.fresh, &self.stale).await {
                    warn!(from = %self.fresh, to = %self.stale, error = %e, "Failed to move image back");
                }
            }
            Step::Uploaded | Step::Untouched => {}
        }
    }

    async fn discard(&self, public_id: &str) {
        if let Err(e) = self.images.delete(public_id).await {
            warn!(public_id, error = %e, "Failed to delete stale image");
        }
    }
}
