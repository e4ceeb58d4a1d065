//! Auto-sync entry points called from the application's event lifecycle.

use serenity::builder::CreateMessage;

use crate::data::{EventRefStore, GuildLinkStore};
use crate::discord::api::{ApiError, DiscordApi};
use crate::error::bridge::BridgeError;
use crate::model::event::Event;
use crate::model::organization::Organization;

use super::{build_event_announcement, EventBridge};

impl EventBridge {
    /// Mirrors a newly created event into the organization's linked guild.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - Remote event id after a successful sync
    /// - `Ok(None)` - No link, or auto-sync disabled for the link
    /// - `Err(BridgeError)` - Terminal failure from the mirror call
    pub async fn sync_event_created(
        &self,
        event: &Event,
        organization: &Organization,
    ) -> Result<Option<String>, BridgeError> {
        let Some(link) = self.links.find_by_organization_id(organization.id).await? else {
            return Ok(None);
        };
        if !link.auto_sync {
            tracing::debug!(
                "auto-sync disabled for guild {}, skipping event {}",
                link.guild_id,
                event.id
            );
            return Ok(None);
        }

        let remote_id = self.create_event_with_retry(event, link.guild_id).await?;
        self.event_refs
            .set_remote_event_id(event.id, Some(&remote_id))
            .await?;

        self.announce(event, organization, link.guild_id).await;

        Ok(Some(remote_id))
    }

    /// Pushes an event update to its remote counterpart.
    ///
    /// An event without a recorded remote ref (created while sync was off)
    /// is created now instead of updated.
    pub async fn sync_event_updated(
        &self,
        event: &Event,
        organization: &Organization,
    ) -> Result<Option<String>, BridgeError> {
        let Some(link) = self.links.find_by_organization_id(organization.id).await? else {
            return Ok(None);
        };
        if !link.auto_sync {
            return Ok(None);
        }

        match self.event_refs.remote_event_id(event.id).await? {
            Some(remote_id) => {
                self.update_event_with_retry(&remote_id, event, link.guild_id)
                    .await?;
                Ok(Some(remote_id))
            }
            None => {
                let remote_id = self.create_event_with_retry(event, link.guild_id).await?;
                self.event_refs
                    .set_remote_event_id(event.id, Some(&remote_id))
                    .await?;
                Ok(Some(remote_id))
            }
        }
    }

    /// Removes the remote counterpart of a deleted event.
    ///
    /// Runs whenever a remote ref exists, even with auto-sync disabled, so
    /// switching sync off cannot orphan a remote event. A remote 404 counts
    /// as already deleted.
    pub async fn sync_event_deleted(
        &self,
        event_id: i32,
        organization: &Organization,
    ) -> Result<(), BridgeError> {
        let Some(link) = self.links.find_by_organization_id(organization.id).await? else {
            return Ok(());
        };
        let Some(remote_id) = self.event_refs.remote_event_id(event_id).await? else {
            return Ok(());
        };

        match self.delete_event(&remote_id, link.guild_id).await {
            Ok(()) => {}
            Err(BridgeError::Api(ApiError::NotFound { .. })) => {
                tracing::debug!("remote event {} already gone", remote_id);
            }
            Err(error) => return Err(error),
        }

        self.event_refs.set_remote_event_id(event_id, None).await?;
        Ok(())
    }

    /// Posts the announcement embed to the guild's system channel, when one
    /// is configured. Best effort: failures are logged, never fatal to the
    /// sync.
    async fn announce(&self, event: &Event, organization: &Organization, guild_id: u64) {
        let guild = match self.api.get_guild(guild_id).await {
            Ok(guild) => guild,
            Err(error) => {
                tracing::warn!("skipping announcement for event {}: {}", event.id, error);
                return;
            }
        };

        let Some(channel_id) = guild
            .system_channel_id
            .as_deref()
            .and_then(|id| id.parse::<u64>().ok())
        else {
            tracing::debug!(
                "guild {} has no system channel, skipping announcement",
                guild_id
            );
            return;
        };

        let message = CreateMessage::new().embed(build_event_announcement(
            event,
            &organization.name,
            &self.app_url,
        ));
        if let Err(error) = self.api.send_channel_message(channel_id, &message).await {
            tracing::error!(
                "failed to announce event {} in channel {}: {}",
                event.id,
                channel_id,
                error
            );
        }
    }
}
