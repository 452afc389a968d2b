// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::scrape_request::DomainError;

/// 账户实体
///
/// 通过 API 密钥解析得到的调用方身份与订阅等级
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub plan: PlanTier,
    pub api_key: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 订阅等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    #[default]
    Free,
    Starter,
    Professional,
    Enterprise,
}

impl PlanTier {
    /// 自定义抓取是付费功能
    pub fn allows_custom_scrape(&self) -> bool {
        match self {
            PlanTier::Free => false,
            PlanTier::Starter | PlanTier::Professional | PlanTier::Enterprise => true,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlanTier::Free => write!(f, "free"),
            PlanTier::Starter => write!(f, "starter"),
            PlanTier::Professional => write!(f, "professional"),
            PlanTier::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl FromStr for PlanTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "starter" => Ok(PlanTier::Starter),
            "professional" => Ok(PlanTier::Professional),
            "enterprise" => Ok(PlanTier::Enterprise),
            other => Err(DomainError::ValidationError(format!(
                "Unknown plan tier: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_paid_plans_allow_custom_scrape() {
        assert!(!PlanTier::Free.allows_custom_scrape());
        assert!(PlanTier::Starter.allows_custom_scrape());
        assert!(PlanTier::Professional.allows_custom_scrape());
        assert!(PlanTier::Enterprise.allows_custom_scrape());
    }

    #[test]
    fn test_plan_parsing() {
        assert_eq!("starter".parse::<PlanTier>().unwrap(), PlanTier::Starter);
        assert!("platinum".parse::<PlanTier>().is_err());
    }
}
