#![allow(clippy::unwrap_used, clippy::expect_used)]

//! In-memory doubles for the domain ports and repositories.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use buycut_sdk::{
    Brand, BrandId, BrandWithCompany, Company, CompanyId, CompanyWithBrands, PageWindow, User,
    UserId,
};
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::images::{ImageFile, UploadTarget};
use crate::domain::ports::{ImageStorage, PasswordHasher, TokenIssuer};
use crate::domain::repo::{
    BrandChanges, BrandRecord, BrandRepository, CompanyChanges, CompanyRecord, CompanyRepository,
    UserCredentials, UserRecord, UserRepository,
};
use crate::domain::service::{AppServices, Collaborators, ServiceConfig};

#[derive(Default)]
struct State {
    companies: Vec<Company>,
    brands: Vec<Brand>,
    users: Vec<UserCredentials>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn company(&self, id: CompanyId) -> Option<Company> {
        self.companies.iter().find(|c| c.id == id).cloned()
    }

    fn with_brands(&self, company: Company) -> CompanyWithBrands {
        let mut brands: Vec<Brand> = self
            .brands
            .iter()
            .filter(|b| b.company_id == company.id)
            .cloned()
            .collect();
        brands.sort_by_key(|b| b.id);
        CompanyWithBrands { company, brands }
    }

    fn with_company(&self, brand: Brand) -> BrandWithCompany {
        let company = self.company(brand.company_id).expect("dangling brand");
        BrandWithCompany { brand, company }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn page<T>(items: Vec<T>, window: PageWindow) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(window.offset).unwrap())
        .take(usize::try_from(window.limit).unwrap())
        .collect()
}

/// Repository double backed by vectors. Implements all three repositories.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
    pub fail_company_update: AtomicBool,
    pub fail_brand_create: AtomicBool,
    pub brand_windows: Mutex<Vec<PageWindow>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_company(&self, name: &str) -> Company {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let company = Company {
            id,
            name: name.to_owned(),
            slug: crate::domain::text::slugify(name),
            description: format!("{name} description"),
            proof: vec![format!("https://proof.test/{id}")],
            image_url: format!("https://img.test/{id}.png"),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        state.companies.push(company.clone());
        company
    }

    pub fn seed_brand(&self, name: &str, company_id: CompanyId) -> Brand {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let brand = Brand {
            id,
            name: name.to_owned(),
            slug: crate::domain::text::slugify(name),
            image_url: format!("https://img.test/b{id}.png"),
            company_id,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        state.brands.push(brand.clone());
        brand
    }

    pub fn company_count(&self) -> usize {
        self.state.lock().unwrap().companies.len()
    }

    pub fn brand_count(&self) -> usize {
        self.state.lock().unwrap().brands.len()
    }

    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl CompanyRepository for FakeStore {
    async fn create(&self, record: CompanyRecord) -> Result<Company, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .companies
            .iter()
            .any(|c| c.name == record.name || c.slug == record.slug)
        {
            return Err(DomainError::duplicate("company"));
        }
        let id = state.next_id();
        let company = Company {
            id,
            name: record.name,
            slug: record.slug,
            description: record.description,
            proof: record.proof,
            image_url: record.image_url,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        state.companies.push(company.clone());
        Ok(company)
    }

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<CompanyWithBrands>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.company(id).map(|c| state.with_brands(c)))
    }

    async fn list(
        &self,
        keyword: Option<&str>,
        window: PageWindow,
    ) -> Result<Vec<CompanyWithBrands>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Company> = state
            .companies
            .iter()
            .filter(|c| keyword.is_none_or(|k| contains_ci(&c.name, k)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(rows, window)
            .into_iter()
            .map(|c| state.with_brands(c))
            .collect())
    }

    async fn count(&self, keyword: Option<&str>) -> Result<u64, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .companies
            .iter()
            .filter(|c| keyword.is_none_or(|k| contains_ci(&c.name, k)))
            .count() as u64)
    }

    async fn search_exact(&self, keyword: &str) -> Result<Vec<CompanyWithBrands>, DomainError> {
        let state = self.state.lock().unwrap();
        let rows: Vec<Company> = state
            .companies
            .iter()
            .filter(|c| c.name.to_lowercase() == keyword.to_lowercase())
            .cloned()
            .collect();
        Ok(rows.into_iter().map(|c| state.with_brands(c)).collect())
    }

    async fn search_like(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<Company>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Company> = state
            .companies
            .iter()
            .filter(|c| contains_ci(&c.name, keyword))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(rows, window))
    }

    async fn count_like(&self, keyword: &str) -> Result<u64, DomainError> {
        CompanyRepository::count(self, Some(keyword)).await
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<CompanyId>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.companies.iter().find(|x| x.slug == slug).map(|x| x.id))
    }

    async fn update(&self, id: CompanyId, changes: CompanyChanges) -> Result<Company, DomainError> {
        if self.fail_company_update.load(Ordering::SeqCst) {
            return Err(DomainError::database("update failed"));
        }
        let mut state = self.state.lock().unwrap();
        if state.companies.iter().any(|c| {
            c.id != id
                && (changes.name.as_ref() == Some(&c.name) || changes.slug.as_ref() == Some(&c.slug))
        }) {
            return Err(DomainError::duplicate("company"));
        }
        let company = state
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found("company", id))?;
        if let Some(v) = changes.name {
            company.name = v;
        }
        if let Some(v) = changes.slug {
            company.slug = v;
        }
        if let Some(v) = changes.description {
            company.description = v;
        }
        if let Some(v) = changes.proof {
            company.proof = v;
        }
        if let Some(v) = changes.image_url {
            company.image_url = v;
        }
        Ok(company.clone())
    }

    async fn delete_with_brands(&self, id: CompanyId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.company(id).is_none() {
            return Err(DomainError::not_found("company", id));
        }
        state.brands.retain(|b| b.company_id != id);
        state.companies.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl BrandRepository for FakeStore {
    async fn create(&self, record: BrandRecord) -> Result<Brand, DomainError> {
        if self.fail_brand_create.load(Ordering::SeqCst) {
            return Err(DomainError::database("insert failed"));
        }
        let mut state = self.state.lock().unwrap();
        if state.company(record.company_id).is_none() {
            return Err(DomainError::not_found("company", record.company_id));
        }
        if state
            .brands
            .iter()
            .any(|b| b.name == record.name || b.slug == record.slug)
        {
            return Err(DomainError::duplicate("brand"));
        }
        let id = state.next_id();
        let brand = Brand {
            id,
            name: record.name,
            slug: record.slug,
            image_url: record.image_url,
            company_id: record.company_id,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        state.brands.push(brand.clone());
        Ok(brand)
    }

    async fn find_by_id(&self, id: BrandId) -> Result<Option<BrandWithCompany>, DomainError> {
        let state = self.state.lock().unwrap();
        let brand = state.brands.iter().find(|b| b.id == id).cloned();
        Ok(brand.map(|b| state.with_company(b)))
    }

    async fn search_exact(&self, keyword: &str) -> Result<Vec<BrandWithCompany>, DomainError> {
        let state = self.state.lock().unwrap();
        let rows: Vec<Brand> = state
            .brands
            .iter()
            .filter(|b| b.name.to_lowercase() == keyword.to_lowercase())
            .cloned()
            .collect();
        Ok(rows.into_iter().map(|b| state.with_company(b)).collect())
    }

    async fn search_like(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<BrandWithCompany>, DomainError> {
        self.brand_windows.lock().unwrap().push(window);
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Brand> = state
            .brands
            .iter()
            .filter(|b| contains_ci(&b.name, keyword))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page(rows, window)
            .into_iter()
            .map(|b| state.with_company(b))
            .collect())
    }

    async fn count_like(&self, keyword: &str) -> Result<u64, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .brands
            .iter()
            .filter(|b| contains_ci(&b.name, keyword))
            .count() as u64)
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<BrandId>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.brands.iter().find(|x| x.slug == slug).map(|x| x.id))
    }

    async fn update(&self, id: BrandId, changes: BrandChanges) -> Result<Brand, DomainError> {
        let mut state = self.state.lock().unwrap();
        if let Some(cid) = changes.company_id
            && state.company(cid).is_none()
        {
            return Err(DomainError::not_found("company", cid));
        }
        if state.brands.iter().any(|b| {
            b.id != id
                && (changes.name.as_ref() == Some(&b.name) || changes.slug.as_ref() == Some(&b.slug))
        }) {
            return Err(DomainError::duplicate("brand"));
        }
        let brand = state
            .brands
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DomainError::not_found("brand", id))?;
        if let Some(v) = changes.name {
            brand.name = v;
        }
        if let Some(v) = changes.slug {
            brand.slug = v;
        }
        if let Some(v) = changes.image_url {
            brand.image_url = v;
        }
        if let Some(v) = changes.company_id {
            brand.company_id = v;
        }
        Ok(brand.clone())
    }

    async fn delete(&self, id: BrandId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let before = state.brands.len();
        state.brands.retain(|b| b.id != id);
        if state.brands.len() == before {
            return Err(DomainError::not_found("brand", id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn create(&self, record: UserRecord) -> Result<User, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .iter()
            .any(|u| u.user.name == record.name || u.user.email == record.email)
        {
            return Err(DomainError::duplicate("user"));
        }
        let id = state.next_id();
        let user = User {
            id,
            name: record.name,
            email: record.email,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        state.users.push(UserCredentials {
            user: user.clone(),
            password_hash: record.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.user.email == email).cloned())
    }
}

/// One call made against [`RecordingImages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCall {
    Upload(UploadTarget),
    Delete(String),
    Rename { from: String, to: String },
    DeleteByTag(String),
    DeleteFolder(String),
}

/// Image storage double that records every call.
#[derive(Default)]
pub struct RecordingImages {
    pub calls: Mutex<Vec<ImageCall>>,
    pub fail_upload: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl RecordingImages {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ImageCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStorage for RecordingImages {
    async fn upload(&self, _image: ImageFile, target: &UploadTarget) -> Result<String, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ImageCall::Upload(target.clone()));
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(DomainError::image_storage("upload rejected"));
        }
        Ok(format!(
            "https://img.test/{}/{}.png",
            target.folder, target.public_id
        ))
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ImageCall::Delete(public_id.to_owned()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(DomainError::image_storage("delete rejected"));
        }
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<String, DomainError> {
        self.calls.lock().unwrap().push(ImageCall::Rename {
            from: from.to_owned(),
            to: to.to_owned(),
        });
        Ok(format!("https://img.test/{to}.png"))
    }

    async fn delete_all_by_tag(&self, tag: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ImageCall::DeleteByTag(tag.to_owned()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(DomainError::image_storage("delete rejected"));
        }
        Ok(())
    }

    async fn delete_folder(&self, path: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push(ImageCall::DeleteFolder(path.to_owned()));
        Ok(())
    }
}

pub struct FakeTokens;

impl TokenIssuer for FakeTokens {
    fn issue(&self, subject: UserId) -> Result<String, DomainError> {
        Ok(format!("token-for-{subject}"))
    }
}

pub struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{plaintext}"))
    }

    async fn verify(&self, plaintext: &str, digest: &str) -> bool {
        digest == format!("hashed:{plaintext}")
    }
}

pub fn png(name: &str) -> ImageFile {
    ImageFile::new(name, vec![0x89, b'P', b'N', b'G'])
}

pub fn services(store: &Arc<FakeStore>, images: &Arc<RecordingImages>) -> AppServices {
    services_with(store, images, &ServiceConfig::default())
}

pub fn services_with(
    store: &Arc<FakeStore>,
    images: &Arc<RecordingImages>,
    config: &ServiceConfig,
) -> AppServices {
    AppServices::new(
        Collaborators {
            companies: store.clone(),
            brands: store.clone(),
            users: store.clone(),
            images: images.clone(),
            tokens: Arc::new(FakeTokens),
            hasher: Arc::new(FakeHasher),
        },
        config,
    )
}
