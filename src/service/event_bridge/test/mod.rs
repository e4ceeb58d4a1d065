mod retry;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use serenity::all::Permissions;
use test_utils::builder::TestBuilder;
use test_utils::factory;

use crate::data::guild_link::GuildLinkRepository;
use crate::data::EventRefStore;
use crate::discord::api::{ApiError, RateLimitInfo};
use crate::discord::mock::MockDiscordApi;
use crate::model::discord::GuildInfo;
use crate::model::event::Event;
use crate::model::organization::Organization;
use crate::scheduler::clock::SystemClock;
use crate::scheduler::retry::RetryScheduler;

use super::EventBridge;

const GUILD_ID: u64 = 4242424242;
const ORGANIZATION_ID: i32 = 7;
const SYSTEM_CHANNEL_ID: u64 = 555000;

/// In-memory stand-in for the application's event table.
#[derive(Default)]
struct InMemoryEventRefStore {
    refs: Mutex<HashMap<i32, String>>,
}

#[async_trait]
impl EventRefStore for InMemoryEventRefStore {
    async fn remote_event_id(&self, event_id: i32) -> Result<Option<String>, DbErr> {
        Ok(self.refs.lock().unwrap().get(&event_id).cloned())
    }

    async fn set_remote_event_id(
        &self,
        event_id: i32,
        remote_id: Option<&str>,
    ) -> Result<(), DbErr> {
        let mut refs = self.refs.lock().unwrap();
        match remote_id {
            Some(id) => {
                refs.insert(event_id, id.to_string());
            }
            None => {
                refs.remove(&event_id);
            }
        }
        Ok(())
    }
}

fn test_event(id: i32) -> Event {
    let starts_at = Utc::now() + Duration::hours(2);
    Event {
        id,
        organization_id: ORGANIZATION_ID,
        title: format!("Event {}", id),
        description: Some("Scrim night".to_string()),
        starts_at,
        ends_at: starts_at + Duration::hours(1),
        location: Some("Main stage".to_string()),
        participant_cap: Some(32),
    }
}

fn test_organization() -> Organization {
    Organization {
        id: ORGANIZATION_ID,
        handle: "night-owls".to_string(),
        name: "Night Owls".to_string(),
        owner_discord_id: 111111,
    }
}

fn guild_with_system_channel() -> GuildInfo {
    GuildInfo {
        id: GUILD_ID.to_string(),
        name: "Test Guild".to_string(),
        icon: None,
        owner_id: "111111".to_string(),
        roles: vec![],
        system_channel_id: Some(SYSTEM_CHANNEL_ID.to_string()),
    }
}

fn rate_limited(secs: f64) -> ApiError {
    ApiError::RateLimited(RateLimitInfo {
        retry_after_secs: secs,
        global: false,
        bucket: None,
        scope: None,
    })
}

fn server_error() -> ApiError {
    ApiError::Response {
        endpoint: "create_scheduled_event".to_string(),
        status: 500,
        code: None,
        message: "Internal Server Error".to_string(),
    }
}

struct BridgeHarness {
    bridge: EventBridge,
    api: Arc<MockDiscordApi>,
    refs: Arc<InMemoryEventRefStore>,
    scheduler: Arc<RetryScheduler>,
    db: DatabaseConnection,
}

/// Builds a bridge over an in-memory database with the given mock API.
/// No guild link is created; tests add one with `link()`.
async fn harness(api: MockDiscordApi) -> BridgeHarness {
    let test = TestBuilder::new()
        .with_bridge_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap().clone();

    let api = Arc::new(api);
    let refs = Arc::new(InMemoryEventRefStore::default());
    let scheduler = RetryScheduler::new(Arc::new(SystemClock));
    let bridge = EventBridge::new(
        api.clone(),
        Arc::clone(&scheduler),
        Arc::new(GuildLinkRepository::new(db.clone())),
        refs.clone(),
        "https://orgboard.example".to_string(),
    );

    BridgeHarness {
        bridge,
        api,
        refs,
        scheduler,
        db,
    }
}

/// Creates a guild link for the test organization.
async fn link(harness: &BridgeHarness, bot_permissions: Permissions, auto_sync: bool) {
    factory::guild_link::GuildLinkFactory::new(&harness.db)
        .guild_id(GUILD_ID.to_string())
        .organization_id(ORGANIZATION_ID)
        .bot_permissions(bot_permissions)
        .auto_sync(auto_sync)
        .build()
        .await
        .unwrap();
}
