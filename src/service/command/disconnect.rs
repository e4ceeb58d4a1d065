use crate::data::GuildLinkStore;
use crate::error::AppError;
use crate::model::interaction::InteractionResponse;

use super::CommandRouter;

impl CommandRouter {
    /// Removes the guild's organization link.
    ///
    /// Requires the same guild-management authority as connect.
    pub(super) async fn disconnect(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<InteractionResponse, AppError> {
        if !self.has_management_authority(guild_id, user_id).await? {
            return Ok(InteractionResponse::ephemeral(
                "You need the Manage Server permission (or be an administrator) to unlink this server.",
            ));
        }

        let Some(link) = self.links.find_by_guild_id(guild_id).await? else {
            return Ok(InteractionResponse::ephemeral(
                "This server is not connected to an organization.",
            ));
        };

        self.links.delete_by_guild_id(guild_id).await?;

        tracing::info!(
            "guild {} unlinked from organization {}",
            guild_id,
            link.organization_id
        );
        Ok(InteractionResponse::public(
            "This server is no longer linked to an organization. Event syncing has stopped.",
        ))
    }
}
