// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 账户（account）：调用方身份与订阅等级
/// - 抓取请求（scrape_request）：自定义URL抓取请求及其生命周期状态机
pub mod account;
pub mod scrape_request;
