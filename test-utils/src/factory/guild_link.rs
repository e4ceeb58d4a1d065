//! Guild link factory for creating test guild link entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serenity::all::Permissions;

/// Factory for creating test guild links with customizable fields.
///
/// Defaults to a fully-permissioned bot with auto-sync enabled, the common
/// case for bridge tests. Override `bot_permissions` to exercise degraded
/// permission paths.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild_link::GuildLinkFactory;
///
/// let link = GuildLinkFactory::new(&db)
///     .guild_id("424242")
///     .organization_id(organization.id)
///     .build()
///     .await?;
/// ```
pub struct GuildLinkFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    organization_id: i32,
    guild_name: String,
    guild_icon_url: Option<String>,
    bot_permissions: Permissions,
    auto_sync: bool,
}

impl<'a> GuildLinkFactory<'a> {
    /// Creates a new GuildLinkFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented numeric string
    /// - organization_id: `1`
    /// - guild_name: `"Guild {id}"`
    /// - guild_icon_url: `None`
    /// - bot_permissions: `Permissions::all()`
    /// - auto_sync: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            organization_id: 1,
            guild_name: format!("Guild {}", id),
            guild_icon_url: None,
            bot_permissions: Permissions::all(),
            auto_sync: true,
        }
    }

    /// Sets the guild id.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the linked organization id.
    pub fn organization_id(mut self, organization_id: i32) -> Self {
        self.organization_id = organization_id;
        self
    }

    /// Sets the guild display name.
    pub fn guild_name(mut self, guild_name: impl Into<String>) -> Self {
        self.guild_name = guild_name.into();
        self
    }

    /// Sets the guild icon URL.
    pub fn guild_icon_url(mut self, guild_icon_url: Option<String>) -> Self {
        self.guild_icon_url = guild_icon_url;
        self
    }

    /// Sets the recorded bot permission bitmask.
    pub fn bot_permissions(mut self, bot_permissions: Permissions) -> Self {
        self.bot_permissions = bot_permissions;
        self
    }

    /// Sets the auto-sync flag.
    pub fn auto_sync(mut self, auto_sync: bool) -> Self {
        self.auto_sync = auto_sync;
        self
    }

    /// Builds and inserts the guild link into the database.
    pub async fn build(self) -> Result<entity::guild_link::Model, DbErr> {
        entity::guild_link::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            organization_id: ActiveValue::Set(self.organization_id),
            guild_name: ActiveValue::Set(self.guild_name),
            guild_icon_url: ActiveValue::Set(self.guild_icon_url),
            bot_permissions: ActiveValue::Set(self.bot_permissions.bits().to_string()),
            auto_sync: ActiveValue::Set(self.auto_sync),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild link with default values.
pub async fn create_guild_link(
    db: &DatabaseConnection,
) -> Result<entity::guild_link::Model, DbErr> {
    GuildLinkFactory::new(db).build().await
}
