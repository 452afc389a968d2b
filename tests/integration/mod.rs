// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 集成测试
//!
//! 通过HTTP接口驱动完整的提交、完成、查询与取消流程

mod health_check;
mod helpers;
mod scrape_api_test;
