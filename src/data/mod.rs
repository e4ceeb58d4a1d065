//! Data access layer.
//!
//! Repositories own the bridge's own tables (guild links, the organization
//! projection) and convert entity models to domain models at the boundary.
//! The store traits are the narrow interfaces the bridge consumes from the
//! wider application; they are wired to concrete implementations at the
//! composition root so handlers and the event bridge never name a database
//! directly.

pub mod guild_link;
pub mod organization;

#[cfg(test)]
mod test;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::model::guild_link::{CreateGuildLinkParam, GuildLink};
use crate::model::organization::Organization;

/// Persistence slot for guild links: at most one active link per guild.
#[async_trait]
pub trait GuildLinkStore: Send + Sync {
    async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildLink>, DbErr>;

    async fn find_by_organization_id(
        &self,
        organization_id: i32,
    ) -> Result<Option<GuildLink>, DbErr>;

    async fn create(&self, param: CreateGuildLinkParam) -> Result<GuildLink, DbErr>;

    /// Returns true when a link existed and was removed.
    async fn delete_by_guild_id(&self, guild_id: u64) -> Result<bool, DbErr>;
}

/// Read access to organizations, owned by the wider application.
#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Organization>, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Organization>, DbErr>;
}

/// Application-side permission check: may this user manage this organization?
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn user_manages_organization(
        &self,
        user_discord_id: u64,
        organization_id: i32,
    ) -> Result<bool, DbErr>;
}

/// Mapping between local event ids and remote scheduled-event ids.
///
/// The event table itself belongs to the wider application; the bridge only
/// reads and writes the remote ref through this interface.
#[async_trait]
pub trait EventRefStore: Send + Sync {
    async fn remote_event_id(&self, event_id: i32) -> Result<Option<String>, DbErr>;

    /// `None` clears the ref after the remote event is deleted.
    async fn set_remote_event_id(
        &self,
        event_id: i32,
        remote_id: Option<&str>,
    ) -> Result<(), DbErr>;
}
