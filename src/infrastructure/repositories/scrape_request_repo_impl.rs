// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::scrape_request::{DomainError, ScrapeRequest, ScrapeStatus};
use crate::domain::repositories::scrape_request_repository::{
    RepositoryError, ScrapeRequestRepository,
};
use crate::infrastructure::database::entities::scrape_request as scrape_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 抓取请求仓库实现
///
/// 基于SeaORM实现的抓取请求数据访问层
#[derive(Clone)]
pub struct ScrapeRequestRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScrapeRequestRepositoryImpl {
    /// 创建新的抓取请求仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<scrape_entity::Model> for ScrapeRequest {
    type Error = DbErr;

    fn try_from(model: scrape_entity::Model) -> Result<Self, Self::Error> {
        let fields: Vec<String> = serde_json::from_value(model.fields)
            .map_err(|e| DbErr::Type(format!("Invalid fields column: {}", e)))?;

        Ok(Self {
            id: model.id,
            request_id: model.request_id,
            owner_id: model.owner_id,
            url: model.url,
            platform: model
                .platform
                .parse()
                .map_err(|e: DomainError| DbErr::Type(e.to_string()))?,
            fields,
            webhook_url: model.webhook_url,
            status: model
                .status
                .parse()
                .map_err(|e: DomainError| DbErr::Type(e.to_string()))?,
            result_data: model.result_data,
            result_count: model.result_count,
            error_message: model.error_message,
            created_at: model.created_at,
            completed_at: model.completed_at,
        })
    }
}

impl From<&ScrapeRequest> for scrape_entity::ActiveModel {
    fn from(request: &ScrapeRequest) -> Self {
        Self {
            id: Set(request.id),
            request_id: Set(request.request_id.clone()),
            owner_id: Set(request.owner_id),
            url: Set(request.url.clone()),
            platform: Set(request.platform.to_string()),
            fields: Set(serde_json::json!(request.fields)),
            webhook_url: Set(request.webhook_url.clone()),
            status: Set(request.status.to_string()),
            result_data: Set(request.result_data.clone()),
            result_count: Set(request.result_count),
            error_message: Set(request.error_message.clone()),
            created_at: Set(request.created_at),
            completed_at: Set(request.completed_at),
        }
    }
}

fn to_domain(models: Vec<scrape_entity::Model>) -> Result<Vec<ScrapeRequest>, RepositoryError> {
    models
        .into_iter()
        .map(|m| ScrapeRequest::try_from(m).map_err(RepositoryError::from))
        .collect()
}

#[async_trait]
impl ScrapeRequestRepository for ScrapeRequestRepositoryImpl {
    async fn create(&self, request: &ScrapeRequest) -> Result<ScrapeRequest, RepositoryError> {
        let model: scrape_entity::ActiveModel = request.into();

        let inserted = model.insert(self.db.as_ref()).await?;
        Ok(ScrapeRequest::try_from(inserted)?)
    }

    async fn find_by_request_id(
        &self,
        request_id: &str,
    ) -> Result<Option<ScrapeRequest>, RepositoryError> {
        let model = scrape_entity::Entity::find()
            .filter(scrape_entity::Column::RequestId.eq(request_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(ScrapeRequest::try_from).transpose()?)
    }

    async fn find_for_owner(
        &self,
        request_id: &str,
        owner_id: Uuid,
    ) -> Result<Option<ScrapeRequest>, RepositoryError> {
        let model = scrape_entity::Entity::find()
            .filter(scrape_entity::Column::RequestId.eq(request_id))
            .filter(scrape_entity::Column::OwnerId.eq(owner_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(ScrapeRequest::try_from).transpose()?)
    }

    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<ScrapeRequest>, u64), RepositoryError> {
        let query =
            scrape_entity::Entity::find().filter(scrape_entity::Column::OwnerId.eq(owner_id));

        let total = query.clone().count(self.db.as_ref()).await?;

        let models = query
            .order_by_desc(scrape_entity::Column::CreatedAt)
            .order_by_desc(scrape_entity::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await?;

        Ok((to_domain(models)?, total))
    }

    async fn transition(
        &self,
        request: &ScrapeRequest,
        expected: ScrapeStatus,
    ) -> Result<bool, RepositoryError> {
        let result = scrape_entity::Entity::update_many()
            .col_expr(
                scrape_entity::Column::Status,
                Expr::value(request.status.to_string()),
            )
            .col_expr(
                scrape_entity::Column::ResultData,
                Expr::value(request.result_data.clone()),
            )
            .col_expr(
                scrape_entity::Column::ResultCount,
                Expr::value(request.result_count),
            )
            .col_expr(
                scrape_entity::Column::ErrorMessage,
                Expr::value(request.error_message.clone()),
            )
            .col_expr(
                scrape_entity::Column::CompletedAt,
                Expr::value(request.completed_at),
            )
            .filter(scrape_entity::Column::RequestId.eq(request.request_id.as_str()))
            .filter(scrape_entity::Column::Status.eq(expected.to_string()))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn fail_stale(
        &self,
        cutoff: DateTime<Utc>,
        message: &str,
    ) -> Result<u64, RepositoryError> {
        let cutoff: DateTime<FixedOffset> = cutoff.into();
        let now: DateTime<FixedOffset> = Utc::now().into();

        let result = scrape_entity::Entity::update_many()
            .col_expr(
                scrape_entity::Column::Status,
                Expr::value(ScrapeStatus::Failed.to_string()),
            )
            .col_expr(
                scrape_entity::Column::ErrorMessage,
                Expr::value(Some(message.to_string())),
            )
            .col_expr(
                scrape_entity::Column::ResultData,
                Expr::value(Option::<serde_json::Value>::None),
            )
            .col_expr(scrape_entity::Column::CompletedAt, Expr::value(Some(now)))
            .filter(
                scrape_entity::Column::Status.is_in(
                    ScrapeStatus::active()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>(),
                ),
            )
            .filter(scrape_entity::Column::CreatedAt.lt(cutoff))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[path = "scrape_request_repo_impl_test.rs"]
mod tests;
