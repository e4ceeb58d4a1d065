use sea_orm::DbErr;

/// Organization as consumed by the bridge: identity, external handle, owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: i32,
    /// External handle users pass to `/orgboard connect`.
    pub handle: String,
    pub name: String,
    pub owner_discord_id: u64,
}

impl Organization {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// Parses the string owner id from the database into u64 for type-safe
    /// comparison against interaction user ids.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(Organization)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse owner_discord_id as u64
    pub fn from_entity(entity: entity::organization::Model) -> Result<Self, DbErr> {
        let owner_discord_id = entity
            .owner_discord_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse owner_discord_id: {}", e)))?;

        Ok(Self {
            id: entity.id,
            handle: entity.handle,
            name: entity.name,
            owner_discord_id,
        })
    }
}
