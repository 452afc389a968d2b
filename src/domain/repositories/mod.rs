// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 账户仓库（account_repository）：按 API 密钥解析调用方账户
/// - 抓取请求仓库（scrape_request_repository）：抓取请求的持久化与状态转换
pub mod account_repository;
pub mod scrape_request_repository;
