// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 负责把新建的抓取请求调度给完成工作器
pub mod completion_queue;
