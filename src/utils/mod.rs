// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 包括错误类型、请求ID生成、遥测初始化等功能
pub mod errors;
pub mod request_id;
pub mod telemetry;
