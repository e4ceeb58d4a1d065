mod guild_link;
mod organization;
