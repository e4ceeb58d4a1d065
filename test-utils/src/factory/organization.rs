//! Organization factory for creating test organization entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test organizations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::organization::OrganizationFactory;
///
/// let organization = OrganizationFactory::new(&db)
///     .handle("night-owls")
///     .owner_discord_id("111111")
///     .build()
///     .await?;
/// ```
pub struct OrganizationFactory<'a> {
    db: &'a DatabaseConnection,
    handle: String,
    name: String,
    owner_discord_id: String,
}

impl<'a> OrganizationFactory<'a> {
    /// Creates a new OrganizationFactory with default values.
    ///
    /// Defaults:
    /// - handle: `"org-{id}"` where id is auto-incremented
    /// - name: `"Organization {id}"`
    /// - owner_discord_id: `"{id}"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            handle: format!("org-{}", id),
            name: format!("Organization {}", id),
            owner_discord_id: id.to_string(),
        }
    }

    /// Sets the organization's external handle.
    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = handle.into();
        self
    }

    /// Sets the organization's display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the Discord id of the organization owner.
    pub fn owner_discord_id(mut self, owner_discord_id: impl Into<String>) -> Self {
        self.owner_discord_id = owner_discord_id.into();
        self
    }

    /// Builds and inserts the organization into the database.
    pub async fn build(self) -> Result<entity::organization::Model, DbErr> {
        entity::organization::ActiveModel {
            handle: ActiveValue::Set(self.handle),
            name: ActiveValue::Set(self.name),
            owner_discord_id: ActiveValue::Set(self.owner_discord_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an organization with default values.
pub async fn create_organization(
    db: &DatabaseConnection,
) -> Result<entity::organization::Model, DbErr> {
    OrganizationFactory::new(db).build().await
}
