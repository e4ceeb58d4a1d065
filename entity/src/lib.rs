pub mod guild_link;
pub mod organization;
pub mod prelude;
