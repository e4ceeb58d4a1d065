mod create;
mod delete;
mod find;
mod replace;

use sea_orm::{DatabaseConnection, DbErr};
use serenity::all::Permissions;
use test_utils::builder::TestBuilder;
use test_utils::factory;

use crate::data::guild_link::GuildLinkRepository;
use crate::data::GuildLinkStore;
use crate::model::guild_link::CreateGuildLinkParam;

async fn setup() -> DatabaseConnection {
    let test = TestBuilder::new()
        .with_bridge_tables()
        .build()
        .await
        .unwrap();
    test.db.as_ref().unwrap().clone()
}

fn link_param(guild_id: u64, organization_id: i32) -> CreateGuildLinkParam {
    CreateGuildLinkParam {
        guild_id,
        organization_id,
        guild_name: format!("Guild {}", guild_id),
        guild_icon_url: None,
        bot_permissions: Permissions::all(),
        auto_sync: true,
    }
}
