use super::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

/// Tests creating a new guild link.
///
/// Verifies that the repository persists the link and converts it back into
/// a domain model with the recorded permission bitmask intact.
///
/// Expected: Ok with link created
#[tokio::test]
async fn creates_link_with_recorded_permissions() -> Result<(), DbErr> {
    let db = setup().await;
    let repo = GuildLinkRepository::new(db.clone());

    let link = repo
        .create(CreateGuildLinkParam {
            guild_id: 424242,
            organization_id: 7,
            guild_name: "Night Owls HQ".to_string(),
            guild_icon_url: Some("https://cdn.discordapp.com/icons/424242/abcd.png".to_string()),
            bot_permissions: Permissions::SEND_MESSAGES | Permissions::MANAGE_EVENTS,
            auto_sync: true,
        })
        .await?;

    assert_eq!(link.guild_id, 424242);
    assert_eq!(link.organization_id, 7);
    assert_eq!(link.guild_name, "Night Owls HQ");
    assert_eq!(
        link.bot_permissions,
        Permissions::SEND_MESSAGES | Permissions::MANAGE_EVENTS
    );
    assert!(link.auto_sync);

    Ok(())
}

/// Tests that snowflakes and bitmasks are stored as strings.
///
/// Verifies the wire-format storage convention: 64-bit values round-trip
/// through string columns without precision loss.
///
/// Expected: Ok with string columns holding decimal values
#[tokio::test]
async fn stores_ids_and_bitmasks_as_strings() -> Result<(), DbErr> {
    let db = setup().await;
    let repo = GuildLinkRepository::new(db.clone());

    repo.create(link_param(u64::MAX - 1, 1)).await?;

    let row = entity::prelude::GuildLink::find()
        .filter(entity::guild_link::Column::GuildId.eq((u64::MAX - 1).to_string()))
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(row.guild_id, (u64::MAX - 1).to_string());
    assert_eq!(row.bot_permissions, Permissions::all().bits().to_string());

    Ok(())
}
