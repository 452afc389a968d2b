// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 用户数据库实体模型
///
/// 对应数据库中的 users 表
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub plan: String,
    #[sea_orm(unique)]
    pub api_key: Option<String>,
    pub is_active: bool,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scrape_request::Entity")]
    ScrapeRequests,
}

impl Related<super::scrape_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScrapeRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
