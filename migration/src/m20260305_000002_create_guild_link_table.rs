use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildLink::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildLink::Id))
                    .col(string_uniq(GuildLink::GuildId))
                    .col(integer(GuildLink::OrganizationId))
                    .col(string(GuildLink::GuildName))
                    .col(string_null(GuildLink::GuildIconUrl))
                    .col(string(GuildLink::BotPermissions))
                    .col(boolean(GuildLink::AutoSync))
                    .col(timestamp_with_time_zone(GuildLink::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildLink {
    Table,
    Id,
    GuildId,
    OrganizationId,
    GuildName,
    GuildIconUrl,
    BotPermissions,
    AutoSync,
    CreatedAt,
}
