//! SeaORM repository implementation for companies.

use async_trait::async_trait;
use buycut_sdk::{Company, CompanyId, CompanyWithBrands, PageWindow};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionError,
    TransactionTrait,
};
use time::OffsetDateTime;

use super::db::{db_err, name_eq, name_like, query_err};
use super::entity::{brand, company};
use crate::domain::error::DomainError;
use crate::domain::repo::{CompanyChanges, CompanyRecord, CompanyRepository};

fn name_column() -> SimpleExpr {
    Expr::col((company::Entity, company::Column::Name)).into()
}

/// Case-insensitive substring match on the company name.
fn company_name_like(keyword: &str) -> SimpleExpr {
    name_like(name_column(), keyword)
}

fn company_name_eq(keyword: &str) -> SimpleExpr {
    name_eq(name_column(), keyword)
}

fn filtered(keyword: Option<&str>) -> Select<company::Entity> {
    let query = company::Entity::find();
    match keyword {
        Some(k) => query.filter(company_name_like(k)),
        None => query,
    }
}

pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_brands(
        &self,
        companies: Vec<company::Model>,
    ) -> Result<Vec<CompanyWithBrands>, DomainError> {
        let brands = companies
            .load_many(
                brand::Entity::find().order_by_asc(brand::Column::Name),
                &self.db,
            )
            .await
            .map_err(|e| query_err(&e))?;

        Ok(companies
            .into_iter()
            .zip(brands)
            .map(|(company, brands)| CompanyWithBrands {
                company: company.into(),
                brands: brands.into_iter().map(Into::into).collect(),
            })
            .collect())
    }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn create(&self, record: CompanyRecord) -> Result<Company, DomainError> {
        let now = OffsetDateTime::now_utc();
        let model = company::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(record.name),
            slug: ActiveValue::Set(record.slug),
            description: ActiveValue::Set(record.description),
            proof: ActiveValue::Set(company::Proofs(record.proof)),
            image_url: ActiveValue::Set(record.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_err("company", &e))?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: CompanyId) -> Result<Option<CompanyWithBrands>, DomainError> {
        let Some(model) = company::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| query_err(&e))?
        else {
            return Ok(None);
        };

        Ok(self.with_brands(vec![model]).await?.pop())
    }

    async fn list(
        &self,
        keyword: Option<&str>,
        window: PageWindow,
    ) -> Result<Vec<CompanyWithBrands>, DomainError> {
        let models = filtered(keyword)
            .order_by_asc(company::Column::Name)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(|e| query_err(&e))?;

        self.with_brands(models).await
    }

    async fn count(&self, keyword: Option<&str>) -> Result<u64, DomainError> {
        filtered(keyword)
            .count(&self.db)
            .await
            .map_err(|e| query_err(&e))
    }

    async fn search_exact(&self, keyword: &str) -> Result<Vec<CompanyWithBrands>, DomainError> {
        let models = company::Entity::find()
            .filter(company_name_eq(keyword))
            .order_by_asc(company::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| query_err(&e))?;

        self.with_brands(models).await
    }

    async fn search_like(
        &self,
        keyword: &str,
        window: PageWindow,
    ) -> Result<Vec<Company>, DomainError> {
        let models = company::Entity::find()
            .filter(company_name_like(keyword))
            .order_by_asc(company::Column::Name)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(|e| query_err(&e))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_like(&self, keyword: &str) -> Result<u64, DomainError> {
        self.count(Some(keyword)).await
    }

    async fn slug_owner(&self, slug: &str) -> Result<Option<CompanyId>, DomainError> {
        let owner = company::Entity::find()
            .filter(company::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| query_err(&e))?;
        Ok(owner.map(|m| m.id))
    }

    async fn update(&self, id: CompanyId, changes: CompanyChanges) -> Result<Company, DomainError> {
        let mut active = company::ActiveModel {
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
        if let Some(description) = changes.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(proof) = changes.proof {
            active.proof = ActiveValue::Set(company::Proofs(proof));
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = ActiveValue::Set(image_url);
        }

        match active.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found("company", id)),
            Err(e) => Err(db_err("company", &e)),
        }
    }

    async fn delete_with_brands(&self, id: CompanyId) -> Result<(), DomainError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    brand::Entity::delete_many()
                        .filter(brand::Column::CompanyId.eq(id))
                        .exec(txn)
                        .await?;

                    let deleted = company::Entity::delete_by_id(id).exec(txn).await?;
                    if deleted.rows_affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("company {id}")));
                    }
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(DbErr::RecordNotFound(_))) => {
                Err(DomainError::not_found("company", id))
            }
            Err(TransactionError::Connection(e) | TransactionError::Transaction(e)) => {
                Err(query_err(&e))
            }
        }
    }
}
