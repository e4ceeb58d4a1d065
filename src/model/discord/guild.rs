use serde::Deserialize;
use serenity::all::Permissions;

/// Guild metadata returned by the guild-info lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub owner_id: String,
    #[serde(default)]
    pub roles: Vec<GuildRole>,
    /// Channel Discord posts system notices to; announcement target when set.
    #[serde(default)]
    pub system_channel_id: Option<String>,
}

impl GuildInfo {
    /// CDN URL for the guild icon, when one is set.
    pub fn icon_url(&self) -> Option<String> {
        self.icon.as_ref().map(|hash| {
            format!("https://cdn.discordapp.com/icons/{}/{}.png", self.id, hash)
        })
    }
}

/// Guild role with its permission bitmask.
///
/// The `@everyone` role shares its id with the guild.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildRole {
    pub id: String,
    pub name: String,
    pub permissions: Permissions,
}
