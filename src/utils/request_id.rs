// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// 公开请求ID前缀
pub const REQUEST_ID_PREFIX: &str = "req_";

/// 生成新的公开请求ID
///
/// 12 字节随机数经 URL 安全的 base64 编码后得到 16 个字符
pub fn generate_request_id() -> String {
    let bytes: [u8; 12] = rand::random();
    format!("{}{}", REQUEST_ID_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}
