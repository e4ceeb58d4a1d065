//! Mirrors local events into Discord scheduled events.
//!
//! Every mutating operation comes in two forms: a direct form that performs
//! one API call, and a retry-wrapped form that absorbs rate limiting through
//! the retry queue. The retry-wrapped forms resolve only on a terminal
//! outcome (success, or a failure the queue will not retry), so intermediate
//! retries are invisible to the caller.
//!
//! Before any mutating call the bridge checks the bot's permission bitmask
//! recorded on the guild link; a shortfall is returned to the caller
//! directly and never handed to the retry queue.

mod announce;
mod sync;

#[cfg(test)]
mod test;

pub use announce::build_event_announcement;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serenity::all::{ScheduledEventType, Timestamp};
use serenity::builder::{CreateScheduledEvent, EditScheduledEvent};
use tokio::sync::oneshot;

use crate::data::{EventRefStore, GuildLinkStore};
use crate::discord::api::DiscordApi;
use crate::discord::permissions::REQUIRED_BOT_PERMISSIONS;
use crate::error::bridge::BridgeError;
use crate::model::event::Event;
use crate::model::guild_link::GuildLink;
use crate::scheduler::retry::{
    extract_rate_limit_info, RetryScheduler, TaskError, DEFAULT_MAX_RETRIES,
};

/// Placeholder location for events that have none; external scheduled
/// events require one.
const DEFAULT_LOCATION: &str = "TBD";

/// Keeps remote scheduled events consistent with local events.
#[derive(Clone)]
pub struct EventBridge {
    api: Arc<dyn DiscordApi>,
    scheduler: Arc<RetryScheduler>,
    links: Arc<dyn GuildLinkStore>,
    event_refs: Arc<dyn EventRefStore>,
    app_url: String,
}

impl EventBridge {
    pub fn new(
        api: Arc<dyn DiscordApi>,
        scheduler: Arc<RetryScheduler>,
        links: Arc<dyn GuildLinkStore>,
        event_refs: Arc<dyn EventRefStore>,
        app_url: String,
    ) -> Self {
        Self {
            api,
            scheduler,
            links,
            event_refs,
            app_url,
        }
    }

    /// Creates the remote scheduled event mirroring `event` in `guild_id`.
    ///
    /// # Returns
    /// - `Ok(String)` - Id of the created remote event
    /// - `Err(BridgeError::GuildNotLinked)` - The guild has no link
    /// - `Err(BridgeError::MissingPermissions)` - Recorded bitmask is short
    /// - `Err(BridgeError::Api)` - Remote call failed
    pub async fn create_event(&self, event: &Event, guild_id: u64) -> Result<String, BridgeError> {
        let link = self.require_link(guild_id).await?;
        ensure_bot_permissions(&link)?;

        let payload = create_payload(event)?;
        let created = self.api.create_scheduled_event(guild_id, &payload).await?;

        tracing::info!(
            "created scheduled event {} for event {} in guild {}",
            created.id,
            event.id,
            guild_id
        );
        Ok(created.id)
    }

    /// Updates the remote scheduled event `remote_event_id` in place.
    pub async fn update_event(
        &self,
        remote_event_id: &str,
        event: &Event,
        guild_id: u64,
    ) -> Result<(), BridgeError> {
        let link = self.require_link(guild_id).await?;
        ensure_bot_permissions(&link)?;

        let payload = update_payload(event)?;
        self.api
            .update_scheduled_event(guild_id, remote_event_id, &payload)
            .await?;
        Ok(())
    }

    /// Deletes the remote scheduled event. Has no retry-wrapped form.
    pub async fn delete_event(
        &self,
        remote_event_id: &str,
        guild_id: u64,
    ) -> Result<(), BridgeError> {
        let link = self.require_link(guild_id).await?;
        ensure_bot_permissions(&link)?;

        self.api
            .delete_scheduled_event(guild_id, remote_event_id)
            .await?;
        Ok(())
    }

    /// Like [`Self::create_event`], but absorbs rate limiting through the
    /// retry queue.
    pub async fn create_event_with_retry(
        &self,
        event: &Event,
        guild_id: u64,
    ) -> Result<String, BridgeError> {
        let task_id = format!("event-create-{}-{}", event.id, Utc::now().timestamp_millis());
        let bridge = self.clone();
        let event = event.clone();

        self.run_with_retry(task_id, move || {
            let bridge = bridge.clone();
            let event = event.clone();
            Box::pin(async move { bridge.create_event(&event, guild_id).await })
        })
        .await
    }

    /// Like [`Self::update_event`], but absorbs rate limiting through the
    /// retry queue.
    pub async fn update_event_with_retry(
        &self,
        remote_event_id: &str,
        event: &Event,
        guild_id: u64,
    ) -> Result<(), BridgeError> {
        let task_id = format!("event-update-{}-{}", event.id, Utc::now().timestamp_millis());
        let bridge = self.clone();
        let event = event.clone();
        let remote_event_id = remote_event_id.to_string();

        self.run_with_retry(task_id, move || {
            let bridge = bridge.clone();
            let event = event.clone();
            let remote_event_id = remote_event_id.clone();
            Box::pin(async move { bridge.update_event(&remote_event_id, &event, guild_id).await })
        })
        .await
    }

    async fn require_link(&self, guild_id: u64) -> Result<GuildLink, BridgeError> {
        self.links
            .find_by_guild_id(guild_id)
            .await?
            .ok_or(BridgeError::GuildNotLinked { guild_id })
    }

    /// Runs `attempt` once inline; a rate-limited failure hands it to the
    /// retry queue. The one-shot result channel created here is fulfilled
    /// exactly once by the first terminal outcome, no matter how many
    /// retries run in between. A dropped sender means the queue exhausted
    /// the retry budget.
    async fn run_with_retry<T>(
        &self,
        task_id: String,
        attempt: impl Fn() -> BoxFuture<'static, Result<T, BridgeError>> + Send + Sync + 'static,
    ) -> Result<T, BridgeError>
    where
        T: Send + 'static,
    {
        let first = attempt().await;
        let info = match &first {
            Err(BridgeError::Api(error)) => extract_rate_limit_info(error),
            _ => None,
        };
        let Some(info) = info else {
            return first;
        };

        tracing::warn!(
            "rate limited (retry in {:.2}s); queueing task {}",
            info.retry_after_secs,
            task_id
        );

        let (tx, rx) = oneshot::channel::<Result<T, BridgeError>>();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let attempt = Arc::new(attempt);

        let operation = Box::new(move || -> BoxFuture<'static, Result<(), TaskError>> {
            let attempt = Arc::clone(&attempt);
            let tx = Arc::clone(&tx);
            Box::pin(async move {
                match (*attempt)().await {
                    Ok(value) => {
                        deliver(&tx, Ok(value));
                        Ok(())
                    }
                    Err(BridgeError::Api(error)) => match extract_rate_limit_info(&error) {
                        Some(info) => Err(TaskError::RateLimited(info)),
                        None => {
                            let reason = error.to_string();
                            deliver(&tx, Err(BridgeError::Api(error)));
                            Err(TaskError::Fatal(reason))
                        }
                    },
                    Err(other) => {
                        let reason = other.to_string();
                        deliver(&tx, Err(other));
                        Err(TaskError::Fatal(reason))
                    }
                }
            })
        });

        self.scheduler
            .schedule_retry(task_id.clone(), operation, &info, DEFAULT_MAX_RETRIES);

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(BridgeError::RetriesExhausted { task_id }),
        }
    }
}

/// Fulfills the one-shot result channel at most once.
fn deliver<T>(
    tx: &Arc<Mutex<Option<oneshot::Sender<Result<T, BridgeError>>>>>,
    result: Result<T, BridgeError>,
) {
    if let Some(tx) = tx.lock().unwrap().take() {
        let _ = tx.send(result);
    }
}

fn ensure_bot_permissions(link: &GuildLink) -> Result<(), BridgeError> {
    let missing = REQUIRED_BOT_PERMISSIONS.difference(link.bot_permissions);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BridgeError::MissingPermissions { missing })
    }
}

fn create_payload(event: &Event) -> Result<CreateScheduledEvent, BridgeError> {
    let mut payload = CreateScheduledEvent::new(
        ScheduledEventType::External,
        &event.title,
        timestamp(event.starts_at)?,
    )
    .end_time(timestamp(event.ends_at)?)
    .location(event.location.as_deref().unwrap_or(DEFAULT_LOCATION));

    if let Some(description) = &event.description {
        payload = payload.description(description);
    }

    Ok(payload)
}

fn update_payload(event: &Event) -> Result<EditScheduledEvent, BridgeError> {
    Ok(EditScheduledEvent::new()
        .name(&event.title)
        .description(event.description.clone().unwrap_or_default())
        .start_time(timestamp(event.starts_at)?)
        .end_time(timestamp(event.ends_at)?)
        .location(event.location.as_deref().unwrap_or(DEFAULT_LOCATION)))
}

fn timestamp(value: DateTime<Utc>) -> Result<Timestamp, BridgeError> {
    Timestamp::from_unix_timestamp(value.timestamp()).map_err(|e| BridgeError::InvalidTimestamp {
        timestamp: value.timestamp(),
        reason: e.to_string(),
    })
}
