use crate::data::{GuildLinkStore, OrganizationStore};
use crate::discord::api::DiscordApi;
use crate::discord::permissions::REQUIRED_BOT_PERMISSIONS;
use crate::error::AppError;
use crate::model::guild_link::GuildLink;
use crate::model::interaction::InteractionResponse;

use super::CommandRouter;

impl CommandRouter {
    /// Reports the guild's link, organization, and bot health publicly.
    pub(super) async fn status(&self, guild_id: u64) -> Result<InteractionResponse, AppError> {
        let Some(link) = self.links.find_by_guild_id(guild_id).await? else {
            return Ok(InteractionResponse::ephemeral(
                "This server is not connected to an organization. Use `/orgboard connect` to link one.",
            ));
        };

        let organization = self.organizations.find_by_id(link.organization_id).await?;
        let organization_line = match &organization {
            Some(organization) => format!("**{}** (#{})", organization.name, organization.id),
            None => format!("organization #{} (no longer exists)", link.organization_id),
        };

        let health = self.bot_health(&link).await;

        Ok(InteractionResponse::public(format!(
            "Connected to {}\nBot: {}\nAuto-sync: {}\nLinked since: {}",
            organization_line,
            health,
            if link.auto_sync { "enabled" } else { "disabled" },
            link.created_at.format("%Y-%m-%d"),
        )))
    }

    /// Best-effort health probe: the guild must be reachable and the
    /// recorded permissions must still cover the required set.
    async fn bot_health(&self, link: &GuildLink) -> &'static str {
        match self.api.get_guild(link.guild_id).await {
            Ok(_) if link.bot_permissions.contains(REQUIRED_BOT_PERMISSIONS) => "healthy",
            Ok(_) => "degraded (missing permissions)",
            Err(error) => {
                tracing::warn!("bot health check failed for guild {}: {}", link.guild_id, error);
                "unreachable"
            }
        }
    }
}
