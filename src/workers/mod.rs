// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 完成工作器处理单个抓取请求，过期清理工作器周期性回收遗留记录
pub mod completion_worker;
pub mod manager;
pub mod stale_request_worker;
pub mod worker;
