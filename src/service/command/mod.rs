//! Interaction command router.
//!
//! Drives the connect/status/disconnect/help state machine behind the
//! `/orgboard` slash command. Each inbound interaction is terminal: it is
//! dispatched to exactly one handler and answered with exactly one response.
//! Any error escaping a handler is caught at [`CommandRouter::handle`] and
//! converted into a generic ephemeral reply, because the platform discards
//! interactions left unanswered.
//!
//! Handlers are not idempotent against redelivery: a replayed connect
//! replaces a link that was just created. Accepted gap, not a
//! guaranteed-once contract.

mod connect;
mod disconnect;
mod help;
mod status;

#[cfg(test)]
mod test;

use std::sync::Arc;

use crate::data::{GuildLinkStore, OrganizationStore, PermissionChecker};
use crate::discord::api::{ApiError, DiscordApi};
use crate::discord::commands::COMMAND_NAME;
use crate::discord::permissions;
use crate::error::AppError;
use crate::model::interaction::{BridgeCommand, InteractionPayload, InteractionResponse};
use crate::util::parse::parse_snowflake;

/// Routes one inbound interaction to its subcommand handler.
///
/// Wired once at startup with the remote client and the persistence
/// collaborators injected.
pub struct CommandRouter {
    api: Arc<dyn DiscordApi>,
    links: Arc<dyn GuildLinkStore>,
    organizations: Arc<dyn OrganizationStore>,
    permissions: Arc<dyn PermissionChecker>,
    application_id: u64,
    app_url: String,
}

impl CommandRouter {
    pub fn new(
        api: Arc<dyn DiscordApi>,
        links: Arc<dyn GuildLinkStore>,
        organizations: Arc<dyn OrganizationStore>,
        permissions: Arc<dyn PermissionChecker>,
        application_id: u64,
        app_url: String,
    ) -> Self {
        Self {
            api,
            links,
            organizations,
            permissions,
            application_id,
            app_url,
        }
    }

    /// Handles one interaction, never leaving it unanswered.
    ///
    /// Errors from dispatch are logged with full detail server-side; the
    /// user gets a generic ephemeral message.
    pub async fn handle(&self, payload: InteractionPayload) -> InteractionResponse {
        match self.dispatch(payload).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!("interaction dispatch failed: {}", error);
                InteractionResponse::ephemeral(
                    "Something went wrong while handling that command. Please try again.",
                )
            }
        }
    }

    async fn dispatch(&self, payload: InteractionPayload) -> Result<InteractionResponse, AppError> {
        let Some(data) = payload.data.as_ref() else {
            return Ok(help::usage(None));
        };
        if data.name != COMMAND_NAME {
            tracing::warn!("received interaction for unexpected command '{}'", data.name);
            return Ok(help::usage(None));
        }

        let command = BridgeCommand::parse(data);

        // Help needs no guild context, so it also works from DMs.
        if let BridgeCommand::Help { unknown } = &command {
            return Ok(help::usage(unknown.as_deref()));
        }

        let (Some(guild_id), Some(member)) = (payload.guild_id.as_deref(), payload.member.as_ref())
        else {
            return Ok(InteractionResponse::ephemeral(
                "This command can only be used inside a server.",
            ));
        };
        let guild_id = parse_snowflake(guild_id)?;
        let user_id = parse_snowflake(&member.user.id)?;

        match command {
            BridgeCommand::Connect { organization } => {
                self.connect(guild_id, user_id, organization).await
            }
            BridgeCommand::Status => self.status(guild_id).await,
            BridgeCommand::Disconnect => self.disconnect(guild_id, user_id).await,
            BridgeCommand::Help { unknown } => Ok(help::usage(unknown.as_deref())),
        }
    }

    /// Remote permission check: does this member hold guild-management
    /// authority (owner, administrator, or Manage Server)?
    ///
    /// A member the API cannot find simply has no authority.
    async fn has_management_authority(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<bool, AppError> {
        match self.api.member_permissions(guild_id, user_id).await {
            Ok(member_permissions) => Ok(permissions::has_management_authority(member_permissions)),
            Err(ApiError::NotFound { .. }) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}
