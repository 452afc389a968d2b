// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::models::scrape_request::DomainError;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::scrape_request_repository::RepositoryError;
use crate::infrastructure::database::entities::user;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use std::sync::Arc;

/// 账户仓库实现
#[derive(Clone)]
pub struct AccountRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<user::Model> for Account {
    type Error = DbErr;

    fn try_from(model: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            email: model.email,
            name: model.name,
            plan: model
                .plan
                .parse()
                .map_err(|e: DomainError| DbErr::Type(e.to_string()))?,
            api_key: model.api_key,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Account> for user::ActiveModel {
    fn from(account: &Account) -> Self {
        Self {
            id: Set(account.id),
            email: Set(account.email.clone()),
            name: Set(account.name.clone()),
            plan: Set(account.plan.to_string()),
            api_key: Set(account.api_key.clone()),
            is_active: Set(account.is_active),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create(&self, account: &Account) -> Result<Account, RepositoryError> {
        let model: user::ActiveModel = account.into();
        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(Account::try_from(inserted)?)
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Account>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::ApiKey.eq(api_key))
            .filter(user::Column::IsActive.eq(true))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Account::try_from).transpose()?)
    }
}
