use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::data::{OrganizationStore, PermissionChecker};
use crate::model::organization::Organization;

/// SeaORM-backed organization store.
///
/// Also implements the application-side permission check: a user manages an
/// organization when they own it.
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganizationStore for OrganizationRepository {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Organization>, DbErr> {
        entity::prelude::Organization::find()
            .filter(entity::organization::Column::Handle.eq(handle))
            .one(&self.db)
            .await?
            .map(Organization::from_entity)
            .transpose()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Organization>, DbErr> {
        entity::prelude::Organization::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Organization::from_entity)
            .transpose()
    }
}

#[async_trait]
impl PermissionChecker for OrganizationRepository {
    async fn user_manages_organization(
        &self,
        user_discord_id: u64,
        organization_id: i32,
    ) -> Result<bool, DbErr> {
        let organization = self.find_by_id(organization_id).await?;

        Ok(organization
            .map(|org| org.owner_discord_id == user_discord_id)
            .unwrap_or(false))
    }
}
