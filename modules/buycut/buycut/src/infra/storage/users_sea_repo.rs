use async_trait::async_trait;
use buycut_sdk::User;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use time::OffsetDateTime;

use super::db::{db_err, query_err};
use super::entity::user;
use crate::domain::error::DomainError;
use crate::domain::repo::{UserCredentials, UserRecord, UserRepository};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, record: UserRecord) -> Result<User, DomainError> {
        let model = user::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(record.name),
            email: ActiveValue::Set(record.email),
            password_hash: ActiveValue::Set(record.password_hash),
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_err("user", &e))?;

        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| query_err(&e))?;

        Ok(model.map(|m| UserCredentials {
            password_hash: m.password_hash.clone(),
            user: m.into(),
        }))
    }
}
