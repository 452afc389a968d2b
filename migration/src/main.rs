// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 数据库迁移工具入口点
///
/// 连接串取自 `DATABASE_URL`，如 `DATABASE_URL=sqlite://dataflow.db?mode=rwc cargo run -p migration -- up`
#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
