use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serenity::all::Permissions;

/// Persisted link between a Discord guild and an organization.
///
/// At most one active link exists per guild; reconnecting replaces the old
/// link rather than merging into it.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildLink {
    pub guild_id: u64,
    pub organization_id: i32,
    pub guild_name: String,
    pub guild_icon_url: Option<String>,
    /// Bot permission bitmask recorded at connect time.
    pub bot_permissions: Permissions,
    /// Whether local events are mirrored into the guild automatically.
    pub auto_sync: bool,
    pub created_at: DateTime<Utc>,
}

impl GuildLink {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// Parses the string guild id and permission bitmask from the database
    /// into their typed forms.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(GuildLink)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse guild_id or bot_permissions
    pub fn from_entity(entity: entity::guild_link::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        let permission_bits = entity
            .bot_permissions
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse bot_permissions: {}", e)))?;

        Ok(Self {
            guild_id,
            organization_id: entity.organization_id,
            guild_name: entity.guild_name,
            guild_icon_url: entity.guild_icon_url,
            bot_permissions: Permissions::from_bits_truncate(permission_bits),
            auto_sync: entity.auto_sync,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for creating a new guild link.
#[derive(Debug, Clone)]
pub struct CreateGuildLinkParam {
    pub guild_id: u64,
    pub organization_id: i32,
    pub guild_name: String,
    pub guild_icon_url: Option<String>,
    pub bot_permissions: Permissions,
    pub auto_sync: bool,
}
