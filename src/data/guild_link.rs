use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::data::GuildLinkStore;
use crate::model::guild_link::{CreateGuildLinkParam, GuildLink};

/// SeaORM-backed guild link store.
pub struct GuildLinkRepository {
    db: DatabaseConnection,
}

impl GuildLinkRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GuildLinkStore for GuildLinkRepository {
    async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildLink>, DbErr> {
        entity::prelude::GuildLink::find()
            .filter(entity::guild_link::Column::GuildId.eq(guild_id.to_string()))
            .one(&self.db)
            .await?
            .map(GuildLink::from_entity)
            .transpose()
    }

    async fn find_by_organization_id(
        &self,
        organization_id: i32,
    ) -> Result<Option<GuildLink>, DbErr> {
        entity::prelude::GuildLink::find()
            .filter(entity::guild_link::Column::OrganizationId.eq(organization_id))
            .one(&self.db)
            .await?
            .map(GuildLink::from_entity)
            .transpose()
    }

    async fn create(&self, param: CreateGuildLinkParam) -> Result<GuildLink, DbErr> {
        let model = entity::guild_link::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            organization_id: ActiveValue::Set(param.organization_id),
            guild_name: ActiveValue::Set(param.guild_name),
            guild_icon_url: ActiveValue::Set(param.guild_icon_url),
            bot_permissions: ActiveValue::Set(param.bot_permissions.bits().to_string()),
            auto_sync: ActiveValue::Set(param.auto_sync),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        GuildLink::from_entity(model)
    }

    async fn delete_by_guild_id(&self, guild_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::GuildLink::delete_many()
            .filter(entity::guild_link::Column::GuildId.eq(guild_id.to_string()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
