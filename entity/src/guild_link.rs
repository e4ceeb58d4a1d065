use sea_orm::entity::prelude::*;

/// Link between a Discord guild and an organization.
///
/// Discord snowflakes and permission bitmasks are stored as strings, matching
/// the wire format Discord itself uses for 64-bit values.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_link")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub organization_id: i32,
    pub guild_name: String,
    pub guild_icon_url: Option<String>,
    pub bot_permissions: String,
    pub auto_sync: bool,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
