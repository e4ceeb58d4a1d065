//! In-memory mock of the Discord API for unit testing without network access.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serenity::builder::{CreateCommand, CreateMessage, CreateScheduledEvent, EditScheduledEvent};

use crate::discord::api::{ApiError, DiscordApi};
use crate::model::discord::{GuildInfo, GuildMember, ScheduledEvent};

/// Records outbound calls and replays scripted results.
///
/// Lookups resolve against guilds and members registered with `with_guild` /
/// `with_member`; unknown ids answer `NotFound` like the real API. Mutating
/// endpoints succeed by default; queue failures with the `fail_next_*`
/// helpers to exercise error paths. Each queued failure is consumed by one
/// call, so a sequence of failures followed by success models a rate-limit
/// burst.
#[derive(Default)]
pub struct MockDiscordApi {
    guilds: Mutex<HashMap<u64, GuildInfo>>,
    members: Mutex<HashMap<(u64, u64), GuildMember>>,
    scheduled_events: Mutex<HashMap<String, ScheduledEvent>>,
    create_event_failures: Mutex<VecDeque<ApiError>>,
    update_event_failures: Mutex<VecDeque<ApiError>>,
    delete_event_failures: Mutex<VecDeque<ApiError>>,
    send_message_failures: Mutex<VecDeque<ApiError>>,
    command_failures: Mutex<VecDeque<ApiError>>,
    next_event_id: Mutex<u64>,
    /// Captured (guild id, payload) pairs from successful event creations.
    pub created_events: Mutex<Vec<(u64, serde_json::Value)>>,
    /// Captured (guild id, event id, payload) from successful updates.
    pub updated_events: Mutex<Vec<(u64, String, serde_json::Value)>>,
    /// Captured (guild id, event id) from successful deletions.
    pub deleted_events: Mutex<Vec<(u64, String)>>,
    /// Captured (channel id, payload) from successful message sends.
    pub sent_messages: Mutex<Vec<(u64, serde_json::Value)>>,
    /// Captured payloads from successful command registrations.
    pub registered_commands: Mutex<Vec<serde_json::Value>>,
}

impl MockDiscordApi {
    pub fn new() -> Self {
        Self {
            next_event_id: Mutex::new(9000),
            ..Default::default()
        }
    }

    /// Registers a guild for lookups. The guild id must be numeric.
    pub fn with_guild(self, guild: GuildInfo) -> Self {
        let id = guild.id.parse::<u64>().expect("numeric guild id in mock");
        self.guilds.lock().unwrap().insert(id, guild);
        self
    }

    /// Registers a member of a guild for lookups.
    pub fn with_member(self, guild_id: u64, member: GuildMember) -> Self {
        let user_id = member
            .user
            .id
            .parse::<u64>()
            .expect("numeric user id in mock");
        self.members.lock().unwrap().insert((guild_id, user_id), member);
        self
    }

    pub fn fail_next_create_event(&self, error: ApiError) {
        self.create_event_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_next_update_event(&self, error: ApiError) {
        self.update_event_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_next_delete_event(&self, error: ApiError) {
        self.delete_event_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_next_send_message(&self, error: ApiError) {
        self.send_message_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_next_create_command(&self, error: ApiError) {
        self.command_failures.lock().unwrap().push_back(error);
    }

    pub fn created_event_count(&self) -> usize {
        self.created_events.lock().unwrap().len()
    }

    pub fn sent_message_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl DiscordApi for MockDiscordApi {
    async fn get_guild(&self, guild_id: u64) -> Result<GuildInfo, ApiError> {
        self.guilds
            .lock()
            .unwrap()
            .get(&guild_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                endpoint: "get_guild".to_string(),
                message: format!("unknown guild {}", guild_id),
            })
    }

    async fn get_guild_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<GuildMember, ApiError> {
        self.members
            .lock()
            .unwrap()
            .get(&(guild_id, user_id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                endpoint: "get_guild_member".to_string(),
                message: format!("unknown member {} in guild {}", user_id, guild_id),
            })
    }

    async fn create_scheduled_event(
        &self,
        guild_id: u64,
        event: &CreateScheduledEvent,
    ) -> Result<ScheduledEvent, ApiError> {
        if let Some(error) = self.create_event_failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        let id = {
            let mut next = self.next_event_id.lock().unwrap();
            *next += 1;
            next.to_string()
        };
        let payload = serde_json::to_value(event).unwrap_or_default();
        let created = ScheduledEvent {
            id: id.clone(),
            guild_id: guild_id.to_string(),
            name: payload
                .get("name")
                .and_then(|name| name.as_str())
                .unwrap_or("event")
                .to_string(),
            description: None,
            scheduled_start_time: None,
            scheduled_end_time: None,
            status: None,
        };
        self.scheduled_events
            .lock()
            .unwrap()
            .insert(id, created.clone());
        self.created_events.lock().unwrap().push((guild_id, payload));
        Ok(created)
    }

    async fn update_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
        event: &EditScheduledEvent,
    ) -> Result<ScheduledEvent, ApiError> {
        if let Some(error) = self.update_event_failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        let existing = self
            .scheduled_events
            .lock()
            .unwrap()
            .get(event_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                endpoint: "update_scheduled_event".to_string(),
                message: format!("unknown scheduled event {}", event_id),
            })?;

        self.updated_events.lock().unwrap().push((
            guild_id,
            event_id.to_string(),
            serde_json::to_value(event).unwrap_or_default(),
        ));
        Ok(existing)
    }

    async fn delete_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
    ) -> Result<(), ApiError> {
        if let Some(error) = self.delete_event_failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        self.scheduled_events.lock().unwrap().remove(event_id);
        self.deleted_events
            .lock()
            .unwrap()
            .push((guild_id, event_id.to_string()));
        Ok(())
    }

    async fn get_scheduled_event(
        &self,
        _guild_id: u64,
        event_id: &str,
    ) -> Result<ScheduledEvent, ApiError> {
        self.scheduled_events
            .lock()
            .unwrap()
            .get(event_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                endpoint: "get_scheduled_event".to_string(),
                message: format!("unknown scheduled event {}", event_id),
            })
    }

    async fn send_channel_message(
        &self,
        channel_id: u64,
        message: &CreateMessage,
    ) -> Result<(), ApiError> {
        if let Some(error) = self.send_message_failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        self.sent_messages
            .lock()
            .unwrap()
            .push((channel_id, serde_json::to_value(message).unwrap_or_default()));
        Ok(())
    }

    async fn create_global_command(&self, command: &CreateCommand) -> Result<(), ApiError> {
        if let Some(error) = self.command_failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        self.registered_commands
            .lock()
            .unwrap()
            .push(serde_json::to_value(command).unwrap_or_default());
        Ok(())
    }
}
