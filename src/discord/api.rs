//! Client interface over the Discord REST endpoints the bridge uses.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serenity::all::Permissions;
use serenity::builder::{CreateCommand, CreateMessage, CreateScheduledEvent, EditScheduledEvent};
use thiserror::Error;

use crate::model::discord::{GuildInfo, GuildMember, ScheduledEvent};

/// Rate-limit descriptor derived from a single 429 response.
///
/// Ephemeral: consumed by the retry scheduler to compute backoff, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// Seconds to wait before retrying; may be fractional.
    pub retry_after_secs: f64,
    /// True when the global limit was hit rather than a per-route bucket.
    pub global: bool,
    /// Rate-limit bucket id from `X-RateLimit-Bucket`, when present.
    pub bucket: Option<String>,
    /// Limit scope from `X-RateLimit-Scope`, when present.
    pub scope: Option<String>,
}

impl RateLimitInfo {
    /// Backoff duration before the next attempt.
    pub fn retry_after(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.retry_after_secs.max(0.0))
    }
}

/// Errors from the Discord REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 429. The only transient, automatically retryable failure.
    #[error("rate limited for {}s (global: {})", .0.retry_after_secs, .0.global)]
    RateLimited(RateLimitInfo),

    /// HTTP 403: the bot lacks access to the resource.
    #[error("permission denied on {endpoint}: {message}")]
    PermissionDenied { endpoint: String, message: String },

    /// HTTP 404.
    #[error("not found on {endpoint}: {message}")]
    NotFound { endpoint: String, message: String },

    /// Any other non-success response.
    #[error("Discord returned {status} on {endpoint}: {message}")]
    Response {
        endpoint: String,
        status: u16,
        /// Discord JSON error code, when the body carried one.
        code: Option<u64>,
        message: String,
    },

    /// Transport-level failure (connect, timeout, decode).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Narrow client interface over the Discord REST endpoints the bridge uses.
///
/// Implemented by the reqwest-backed [`RestClient`](crate::discord::client::RestClient)
/// in production and by [`MockDiscordApi`](crate::discord::mock::MockDiscordApi)
/// in tests.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    async fn get_guild(&self, guild_id: u64) -> Result<GuildInfo, ApiError>;

    async fn get_guild_member(&self, guild_id: u64, user_id: u64)
        -> Result<GuildMember, ApiError>;

    async fn create_scheduled_event(
        &self,
        guild_id: u64,
        event: &CreateScheduledEvent,
    ) -> Result<ScheduledEvent, ApiError>;

    async fn update_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
        event: &EditScheduledEvent,
    ) -> Result<ScheduledEvent, ApiError>;

    async fn delete_scheduled_event(&self, guild_id: u64, event_id: &str)
        -> Result<(), ApiError>;

    async fn get_scheduled_event(
        &self,
        guild_id: u64,
        event_id: &str,
    ) -> Result<ScheduledEvent, ApiError>;

    async fn send_channel_message(
        &self,
        channel_id: u64,
        message: &CreateMessage,
    ) -> Result<(), ApiError>;

    async fn create_global_command(&self, command: &CreateCommand) -> Result<(), ApiError>;

    /// Effective permissions of a member, computed from guild and member
    /// data: the guild owner resolves to all permissions, otherwise the
    /// union of `@everyone` and the member's role permissions, with
    /// `ADMINISTRATOR` widening to all.
    async fn member_permissions(&self, guild_id: u64, user_id: u64) -> Result<Permissions, ApiError> {
        let guild = self.get_guild(guild_id).await?;
        if guild.owner_id == user_id.to_string() {
            return Ok(Permissions::all());
        }

        let member = self.get_guild_member(guild_id, user_id).await?;

        // The @everyone role shares its id with the guild.
        let everyone = guild_id.to_string();
        let mut permissions = Permissions::empty();
        for role in &guild.roles {
            if role.id == everyone || member.roles.contains(&role.id) {
                permissions |= role.permissions;
            }
        }

        if permissions.contains(Permissions::ADMINISTRATOR) {
            return Ok(Permissions::all());
        }
        Ok(permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::mock::MockDiscordApi;
    use crate::model::discord::{GuildRole, MemberUser};

    fn guild(owner_id: &str, roles: Vec<GuildRole>) -> GuildInfo {
        GuildInfo {
            id: "42".to_string(),
            name: "Test Guild".to_string(),
            icon: None,
            owner_id: owner_id.to_string(),
            roles,
            system_channel_id: None,
        }
    }

    fn role(id: &str, permissions: Permissions) -> GuildRole {
        GuildRole {
            id: id.to_string(),
            name: format!("role-{}", id),
            permissions,
        }
    }

    fn member(user_id: u64, roles: Vec<&str>) -> GuildMember {
        GuildMember {
            user: MemberUser {
                id: user_id.to_string(),
                username: None,
            },
            nick: None,
            roles: roles.into_iter().map(String::from).collect(),
        }
    }

    #[tokio::test]
    async fn owner_gets_all_permissions() {
        let api = MockDiscordApi::new().with_guild(guild("7", vec![]));

        let permissions = api.member_permissions(42, 7).await.unwrap();

        assert_eq!(permissions, Permissions::all());
    }

    #[tokio::test]
    async fn member_permissions_union_everyone_and_roles() {
        let api = MockDiscordApi::new()
            .with_guild(guild(
                "7",
                vec![
                    role("42", Permissions::VIEW_CHANNEL),
                    role("100", Permissions::MANAGE_GUILD),
                    role("101", Permissions::BAN_MEMBERS),
                ],
            ))
            .with_member(42, member(8, vec!["100"]));

        let permissions = api.member_permissions(42, 8).await.unwrap();

        assert!(permissions.contains(Permissions::VIEW_CHANNEL));
        assert!(permissions.contains(Permissions::MANAGE_GUILD));
        assert!(!permissions.contains(Permissions::BAN_MEMBERS));
    }

    #[tokio::test]
    async fn administrator_role_widens_to_all() {
        let api = MockDiscordApi::new()
            .with_guild(guild("7", vec![role("100", Permissions::ADMINISTRATOR)]))
            .with_member(42, member(8, vec!["100"]));

        let permissions = api.member_permissions(42, 8).await.unwrap();

        assert_eq!(permissions, Permissions::all());
    }

    #[tokio::test]
    async fn unknown_member_errors_not_found() {
        let api = MockDiscordApi::new().with_guild(guild("7", vec![]));

        let result = api.member_permissions(42, 8).await;

        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }
}
