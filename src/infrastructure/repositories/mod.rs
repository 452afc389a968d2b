// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 SeaORM 的领域仓库特质实现
pub mod account_repo_impl;
pub mod scrape_request_repo_impl;
