use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapeRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapeRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScrapeRequests::RequestId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ScrapeRequests::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(ScrapeRequests::Url).text().not_null())
                    .col(
                        ColumnDef::new(ScrapeRequests::Platform)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapeRequests::Fields).json().not_null())
                    .col(ColumnDef::new(ScrapeRequests::WebhookUrl).text())
                    .col(
                        ColumnDef::new(ScrapeRequests::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapeRequests::ResultData).json())
                    .col(
                        ColumnDef::new(ScrapeRequests::ResultCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ScrapeRequests::ErrorMessage).text())
                    .col(
                        ColumnDef::new(ScrapeRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ScrapeRequests::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scrape_requests_owner")
                            .from(ScrapeRequests::Table, ScrapeRequests::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scrape_requests_owner_created")
                    .table(ScrapeRequests::Table)
                    .col(ScrapeRequests::OwnerId)
                    .col(ScrapeRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scrape_requests_status")
                    .table(ScrapeRequests::Table)
                    .col(ScrapeRequests::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapeRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScrapeRequests {
    Table,
    Id,
    RequestId,
    OwnerId,
    Url,
    Platform,
    Fields,
    WebhookUrl,
    Status,
    ResultData,
    ResultCount,
    ErrorMessage,
    CreatedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
