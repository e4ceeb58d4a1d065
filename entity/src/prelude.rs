pub use super::guild_link::Entity as GuildLink;
pub use super::organization::Entity as Organization;
