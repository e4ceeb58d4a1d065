use serenity::all::Permissions;

use crate::data::{GuildLinkStore, OrganizationStore, PermissionChecker};
use crate::discord::api::DiscordApi;
use crate::discord::permissions::REQUIRED_BOT_PERMISSIONS;
use crate::error::AppError;
use crate::model::guild_link::CreateGuildLinkParam;
use crate::model::interaction::InteractionResponse;

use super::CommandRouter;

impl CommandRouter {
    /// Links the guild to an organization.
    ///
    /// Reconnecting always replaces the previous link rather than merging
    /// into it; the delete-then-create sequence is not atomic, so a crash in
    /// between leaves the guild unlinked until someone reconnects.
    pub(super) async fn connect(
        &self,
        guild_id: u64,
        user_id: u64,
        organization: Option<String>,
    ) -> Result<InteractionResponse, AppError> {
        if !self.has_management_authority(guild_id, user_id).await? {
            return Ok(InteractionResponse::ephemeral(
                "You need the Manage Server permission (or be an administrator) to link this server.",
            ));
        }

        if self.links.find_by_guild_id(guild_id).await?.is_some() {
            tracing::info!("replacing existing link for guild {}", guild_id);
            self.links.delete_by_guild_id(guild_id).await?;
        }

        let bot_permissions = self
            .api
            .member_permissions(guild_id, self.application_id)
            .await?;
        let missing = REQUIRED_BOT_PERMISSIONS.difference(bot_permissions);
        if !missing.is_empty() {
            return Ok(InteractionResponse::ephemeral(format!(
                "The bot is missing permissions it needs in this server: {}. Re-invite it and try again.",
                permission_names(missing),
            )));
        }

        let Some(handle) = organization else {
            return Ok(InteractionResponse::ephemeral(
                "Linking a personal account is not supported yet. Pass the `organization` option to link an organization.",
            ));
        };
        let Some(organization) = self.organizations.find_by_handle(&handle).await? else {
            return Ok(InteractionResponse::ephemeral(format!(
                "No organization found for `{}`.",
                handle
            )));
        };
        if !self
            .permissions
            .user_manages_organization(user_id, organization.id)
            .await?
        {
            return Ok(InteractionResponse::ephemeral(format!(
                "Only managers of **{}** can link it to a server.",
                organization.name
            )));
        }

        let guild = self.api.get_guild(guild_id).await?;
        self.links
            .create(CreateGuildLinkParam {
                guild_id,
                organization_id: organization.id,
                guild_name: guild.name.clone(),
                guild_icon_url: guild.icon_url(),
                bot_permissions,
                auto_sync: true,
            })
            .await?;

        tracing::info!(
            "guild {} linked to organization {} ({})",
            guild_id,
            organization.id,
            organization.handle
        );
        Ok(InteractionResponse::public(format!(
            "This server is now linked to **{}**. Upcoming events will sync automatically. Manage them at {}",
            organization.name, self.app_url
        )))
    }
}

fn permission_names(missing: Permissions) -> String {
    missing
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ")
}
