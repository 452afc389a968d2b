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

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Json, Path, Query,
    },
    http::StatusCode,
};
use std::sync::Arc;

use crate::{
    application::{
        dto::{
            scrape_request::{ScrapeHistoryQuery, ScrapeRequestDto},
            scrape_response::{
                CancelScrapeResponse, ScrapeHistoryItem, ScrapeHistoryResponse,
                ScrapeResultsResponse, ScrapeStatusResponse,
            },
        },
        use_cases::scrape_use_case::ScrapeUseCase,
    },
    domain::{
        models::account::Account,
        repositories::scrape_request_repository::ScrapeRequestRepository,
    },
    presentation::errors::AppError,
    queue::completion_queue::CompletionQueue,
};

/// 提交抓取请求
///
/// 成功时返回 201 和处理中的状态
pub async fn create_scrape<R, Q>(
    Extension(use_case): Extension<Arc<ScrapeUseCase<R, Q>>>,
    Extension(account): Extension<Account>,
    payload: Result<Json<ScrapeRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<ScrapeStatusResponse>), AppError>
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    let Json(dto) = payload?;
    let created = use_case.create(&account, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(use_case.submission_response(&created)),
    ))
}

/// 查询抓取状态
pub async fn get_scrape_status<R, Q>(
    Extension(use_case): Extension<Arc<ScrapeUseCase<R, Q>>>,
    Extension(account): Extension<Account>,
    Path(request_id): Path<String>,
) -> Result<Json<ScrapeStatusResponse>, AppError>
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    let status = use_case.get_status(&request_id, account.id).await?;
    Ok(Json(status))
}

/// 获取抓取结果
pub async fn get_scrape_results<R, Q>(
    Extension(use_case): Extension<Arc<ScrapeUseCase<R, Q>>>,
    Extension(account): Extension<Account>,
    Path(request_id): Path<String>,
) -> Result<Json<ScrapeResultsResponse>, AppError>
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    let results = use_case.get_results(&request_id, account.id).await?;
    Ok(Json(results))
}

/// 分页列出抓取历史
pub async fn list_scrapes<R, Q>(
    Extension(use_case): Extension<Arc<ScrapeUseCase<R, Q>>>,
    Extension(account): Extension<Account>,
    query: Result<Query<ScrapeHistoryQuery>, QueryRejection>,
) -> Result<Json<ScrapeHistoryResponse>, AppError>
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    let Query(query) = query?;
    let (records, total) = use_case.list(account.id, query).await?;

    Ok(Json(ScrapeHistoryResponse {
        requests: records.iter().map(ScrapeHistoryItem::from).collect(),
        total,
    }))
}

/// 取消抓取请求
pub async fn cancel_scrape<R, Q>(
    Extension(use_case): Extension<Arc<ScrapeUseCase<R, Q>>>,
    Extension(account): Extension<Account>,
    Path(request_id): Path<String>,
) -> Result<Json<CancelScrapeResponse>, AppError>
where
    R: ScrapeRequestRepository + 'static,
    Q: CompletionQueue + 'static,
{
    let cancelled = use_case.cancel(&request_id, account.id).await?;

    Ok(Json(CancelScrapeResponse {
        message: "Scraping request cancelled".to_string(),
        request_id: cancelled.request_id,
        status: cancelled.status,
    }))
}
