//! SeaORM repository implementation for brands.

use async_trait::async_trait;
use buycut_sdk::{Brand, BrandId, BrandWithCompany, PageWindow};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use time::OffsetDateTime;

use super::db::{db_err, name_eq, name_like, query_err};
use super::entity::{brand, company};
use crate::domain::error::DomainError;
use crate::domain::repo::{BrandChanges, BrandRecord, BrandRepository};

fn name_column() -> SimpleExpr {
    Expr::col((brand::Entity, brand::Column::Name)).into()
}

fn brand_name_like(keyword: &str) -> SimpleExpr {
    name_like(name_column(), keyword)
}

fn brand_name_eq(keyword: &str) -> SimpleExpr {
    name_eq(name_column(), keyword)
}

fn joined(
    (brand, company): (brand::Model, Option<company::Model>),
) -> Result<BrandWithCompany, DomainError> {
    let company = company
        .ok_or_else(|| DomainError::internal(format!("brand {} has no company row", brand.id)))?;
    Ok(BrandWithCompany {
        brand: brand.into(),
        company: company.into(),
    })
}

pub struct SeaOrmBrandRepository {
    db: DatabaseConnection,
}

impl SeaOrmBrandRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BrandRepository for SeaOrmBrandRepository {
    async fn create(&self, record: BrandRecord) -> Result<Brand, DomainError> {
        let now = OffsetDateTime::now_utc();
        let model = brand::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(record.name),
            slug: ActiveValue::Set(record.slug),
            image_url: ActiveValue::Set(record.image_url),
            company_id: ActiveValue::Set(record.company_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_err("brand", &e))?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: BrandId) -> Result<Option<BrandWithCompany>, DomainError> {
        brand::Entity::find_by_id(id)
            .find_also_related(company::Entity)
            .one(&self.db)
            .await
            .map_err(|e| query_err(&e))?
            .map(joined)
            .transpose()
    }

    async fn search_exact(&self, keyword: &str) -> Result<Vec<BrandWithCompany>, DomainError> {
        brand::Entity::find()
            .find_also_related(company::Entity)
            .filter(brand_name_eq(keyword))
            .order_by_asc(brand::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| query_err(&e))?
            .into_iter()
            .map(joined)
            .collect()
    }

    async fn search_like(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<BrandWithCompany>, DomainError> {
        brand::Entity::find()
            .find_also_related(company::Entity)
            .filter(brand_name_like(keyword))
            .order_by_asc(brand::Column::Name)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(|e| query_err(&e))?
            .into_iter()
            .map(joined)
            .collect()
    }

    async fn count_like(&self, keyword: &str) -> Result<u64, DomainError> {
        brand::Entity::find()
            .filter(brand_name_like(keyword))
            .count(&self.db)
            .await
            .map_err(|e| query_err(&e))
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<BrandId>, DomainError> {
        let owner = brand::Entity::find()
            .filter(brand::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| query_err(&e))?;
        Ok(owner.map(|m| m.id))
    }

    async fn update(&self, id: BrandId, changes: BrandChanges) -> Result<Brand, DomainError> {
        let mut active = brand::ActiveModel {
            id: ActiveValue::Unchanged(id),
            updated_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(slug) = changes.slug {
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = ActiveValue::Set(image_url);
        }
        if let Some(company_id) = changes.company_id {
            active.company_id = ActiveValue::Set(company_id);
        }

        match active.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found("brand", id)),
            Err(e) => Err(db_err("brand", &e)),
        }
    }

    async fn delete(&self, id: BrandId) -> Result<(), DomainError> {
        let result = brand::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| query_err(&e))?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("brand", id));
        }
        Ok(())
    }
}
