// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod manual_queue;

use axum_test::TestServer;
use chrono::Utc;
use dataflow::application::use_cases::scrape_use_case::ScrapeUseCase;
use dataflow::config::settings::DatabaseSettings;
use dataflow::domain::models::account::{Account, PlanTier};
use dataflow::domain::repositories::account_repository::AccountRepository;
use dataflow::engines::placeholder_engine::PlaceholderExecutor;
use dataflow::infrastructure::database::connection;
use dataflow::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use dataflow::infrastructure::repositories::scrape_request_repo_impl::ScrapeRequestRepositoryImpl;
use dataflow::presentation::middleware::auth_middleware::AuthState;
use dataflow::presentation::routes;
use dataflow::workers::completion_worker::CompletionWorker;
use manual_queue::ManualCompletionQueue;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/v1";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub queue: Arc<ManualCompletionQueue>,
    pub worker: CompletionWorker<ScrapeRequestRepositoryImpl>,
    pub scrape_repo: Arc<ScrapeRequestRepositoryImpl>,
    /// Starter 计划账户
    pub starter_key: String,
    /// 另一个 Starter 计划账户，用于验证隔离
    pub other_key: String,
    /// Free 计划账户
    pub free_key: String,
}

impl TestApp {
    /// 运行所有已提交但尚未处理的完成任务
    pub async fn run_completions(&self) {
        for request_id in self.queue.drain() {
            self.worker.process(&request_id).await.unwrap();
        }
    }
}

pub async fn create_test_app() -> TestApp {
    let db_settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: None,
        idle_timeout: None,
    };
    let db = Arc::new(connection::create_pool(&db_settings).await.unwrap());
    Migrator::up(db.as_ref(), None).await.unwrap();

    let accounts = Arc::new(AccountRepositoryImpl::new(db.clone()));
    let starter_key = seed_account(accounts.as_ref(), PlanTier::Starter).await;
    let other_key = seed_account(accounts.as_ref(), PlanTier::Professional).await;
    let free_key = seed_account(accounts.as_ref(), PlanTier::Free).await;

    let scrape_repo = Arc::new(ScrapeRequestRepositoryImpl::new(db));
    let queue = Arc::new(ManualCompletionQueue::new());
    let use_case = Arc::new(ScrapeUseCase::new(scrape_repo.clone(), queue.clone(), "30s"));
    let worker = CompletionWorker::new(
        scrape_repo.clone(),
        Arc::new(PlaceholderExecutor::default()),
    );

    let app = routes::routes(API_PREFIX, use_case, AuthState::new(accounts));
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        queue,
        worker,
        scrape_repo,
        starter_key,
        other_key,
        free_key,
    }
}

async fn seed_account(accounts: &AccountRepositoryImpl, plan: PlanTier) -> String {
    let id = Uuid::new_v4();
    let api_key = format!("df_{}", id.simple());
    accounts
        .create(&Account {
            id,
            email: format!("{}@example.com", id),
            name: format!("{} user", plan),
            plan,
            api_key: Some(api_key.clone()),
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        })
        .await
        .unwrap();
    api_key
}
