// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 抓取请求创建计数
pub const SCRAPE_REQUESTS_CREATED: &str = "scrape_requests_created_total";
/// 抓取请求完成计数
pub const SCRAPE_REQUESTS_COMPLETED: &str = "scrape_requests_completed_total";
/// 抓取请求失败计数，按 reason 标签区分
pub const SCRAPE_REQUESTS_FAILED: &str = "scrape_requests_failed_total";
/// 抓取请求取消计数
pub const SCRAPE_REQUESTS_CANCELLED: &str = "scrape_requests_cancelled_total";

/// 安装 Prometheus 导出器
///
/// 未启用或地址无效时仅记录日志，不影响服务启动
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address '{}': {}",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(
        SCRAPE_REQUESTS_CREATED,
        "Total number of scraping requests accepted"
    );
    describe_counter!(
        SCRAPE_REQUESTS_COMPLETED,
        "Total number of scraping requests completed"
    );
    describe_counter!(
        SCRAPE_REQUESTS_FAILED,
        "Total number of scraping requests failed, labelled by reason"
    );
    describe_counter!(
        SCRAPE_REQUESTS_CANCELLED,
        "Total number of scraping requests cancelled by their owner"
    );
}
