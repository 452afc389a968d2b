// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::repositories::scrape_request_repository::RepositoryError;
use async_trait::async_trait;

/// 账户仓库特质
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 创建账户
    async fn create(&self, account: &Account) -> Result<Account, RepositoryError>;
    /// 根据 API 密钥查找有效账户，停用账户视为不存在
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Account>, RepositoryError>;
}
