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

use dataflow::application::use_cases::scrape_use_case::ScrapeUseCase;
use dataflow::config::settings::Settings;
use dataflow::engines::placeholder_engine::PlaceholderExecutor;
use dataflow::infrastructure::database::connection;
use dataflow::infrastructure::metrics;
use dataflow::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use dataflow::infrastructure::repositories::scrape_request_repo_impl::ScrapeRequestRepositoryImpl;
use dataflow::presentation::middleware::auth_middleware::AuthState;
use dataflow::presentation::routes;
use dataflow::queue::completion_queue::SpawnedCompletionQueue;
use dataflow::utils::telemetry;
use dataflow::workers::completion_worker::CompletionWorker;
use dataflow::workers::manager::WorkerManager;
use dataflow::workers::stale_request_worker::StaleRequestWorker;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&settings.log);
    info!("Starting dataflow...");
    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize components
    let scrape_repo = Arc::new(ScrapeRequestRepositoryImpl::new(db.clone()));
    let account_repo = Arc::new(AccountRepositoryImpl::new(db.clone()));

    let executor = Arc::new(PlaceholderExecutor::new(settings.worker.simulated_delay()));
    let completion_worker = Arc::new(CompletionWorker::new(scrape_repo.clone(), executor));
    let queue = Arc::new(SpawnedCompletionQueue::new(
        completion_worker,
        settings.worker.completion_timeout(),
    ));
    let use_case = Arc::new(ScrapeUseCase::new(
        scrape_repo.clone(),
        queue,
        settings.scrape.estimated_time.clone(),
    ));

    // 5. Start background workers
    let mut worker_manager = WorkerManager::new();
    worker_manager.spawn(StaleRequestWorker::new(
        scrape_repo.clone(),
        settings.worker.sweep_interval(),
        settings.worker.stale_after(),
    ));

    // 6. Start HTTP server
    let app = routes::routes(
        &settings.server.api_prefix,
        use_case,
        AuthState::new(account_repo),
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker_manager.shutdown();
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }
}
