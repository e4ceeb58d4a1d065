pub mod guild_link;
pub mod helpers;
pub mod organization;
