
use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serenity::all::Permissions;
use test_utils::builder::TestBuilder;
use test_utils::factory;

use crate::data::guild_link::GuildLinkRepository;
use crate::data::organization::OrganizationRepository;
use crate::discord::mock::MockDiscordApi;
use crate::discord::permissions::REQUIRED_BOT_PERMISSIONS;
use crate::model::discord::{GuildInfo, GuildMember, GuildRole, MemberUser};
use crate::model::interaction::InteractionPayload;

use super::CommandRouter;

const GUILD_ID: u64 = 4242424242;
/// Guild owner; passes the remote authority check via the owner rule.
const OWNER_ID: u64 = 111111;
/// Plain member without any management role.
const MEMBER_ID: u64 = 222222;
/// The bot's application id; its member carries the bot role.
const BOT_ID: u64 = 999999;
/// Role granting the bot its required permissions.
const BOT_ROLE_ID: &str = "555";

fn test_guild() -> GuildInfo {
    GuildInfo {
        id: GUILD_ID.to_string(),
        name: "Test Guild".to_string(),
        icon: Some("abcd1234".to_string()),
        owner_id: OWNER_ID.to_string(),
        roles: vec![
            GuildRole {
                id: GUILD_ID.to_string(),
                name: "@everyone".to_string(),
                permissions: Permissions::VIEW_CHANNEL,
            },
            GuildRole {
                id: BOT_ROLE_ID.to_string(),
                name: "orgboard-bot".to_string(),
                permissions: REQUIRED_BOT_PERMISSIONS,
            },
        ],
        system_channel_id: None,
    }
}

fn test_member(user_id: u64, roles: Vec<&str>) -> GuildMember {
    GuildMember {
        user: MemberUser {
            id: user_id.to_string(),
            username: None,
        },
        nick: None,
        roles: roles.into_iter().map(String::from).collect(),
    }
}

/// Mock API with the test guild, its owner, a plain member, and a properly
/// permissioned bot member.
fn default_api() -> MockDiscordApi {
    MockDiscordApi::new()
        .with_guild(test_guild())
        .with_member(GUILD_ID, test_member(OWNER_ID, vec![]))
        .with_member(GUILD_ID, test_member(MEMBER_ID, vec![]))
        .with_member(GUILD_ID, test_member(BOT_ID, vec![BOT_ROLE_ID]))
}

struct RouterHarness {
    router: CommandRouter,
    db: DatabaseConnection,
}

async fn harness_with_api(api: MockDiscordApi) -> RouterHarness {
    let test = TestBuilder::new()
        .with_bridge_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap().clone();

    let organizations = Arc::new(OrganizationRepository::new(db.clone()));
    let router = CommandRouter::new(
        Arc::new(api),
        Arc::new(GuildLinkRepository::new(db.clone())),
        organizations.clone(),
        organizations,
        BOT_ID,
        "https://orgboard.example".to_string(),
    );

    RouterHarness { router, db }
}

async fn harness() -> RouterHarness {
    harness_with_api(default_api()).await
}

/// Builds a command interaction payload the way Discord delivers it.
fn interaction(subcommand: &str, options: serde_json::Value, user_id: u64) -> InteractionPayload {
    serde_json::from_value(serde_json::json!({
        "id": "1",
        "token": "tok",
        "type": 2,
        "guild_id": GUILD_ID.to_string(),
        "member": {"user": {"id": user_id.to_string()}},
        "data": {
            "name": "orgboard",
            "options": [{"name": subcommand, "type": 1, "options": options}],
        },
    }))
    .unwrap()
}

fn connect_interaction(handle: &str, user_id: u64) -> InteractionPayload {
    interaction(
        "connect",
        serde_json::json!([{"name": "organization", "type": 3, "value": handle}]),
        user_id,
    )
}

async fn link_count(db: &DatabaseConnection) -> u64 {
    entity::prelude::GuildLink::find().count(db).await.unwrap()
}
