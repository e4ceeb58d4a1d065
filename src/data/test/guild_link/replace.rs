use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests the replace-on-reconnect sequence.
///
/// Reconnecting a guild is delete-then-create; afterwards exactly one link
/// must exist for the guild, pointing at the new organization. Never zero,
/// never two.
///
/// Expected: Ok with exactly one link after the sequence
#[tokio::test]
async fn replace_leaves_exactly_one_link() -> Result<(), DbErr> {
    let db = setup().await;

    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("424242")
        .organization_id(1)
        .build()
        .await?;

    let repo = GuildLinkRepository::new(db.clone());

    repo.delete_by_guild_id(424242).await?;
    repo.create(link_param(424242, 2)).await?;

    let count = entity::prelude::GuildLink::find().count(&db).await?;
    assert_eq!(count, 1);

    let link = repo.find_by_guild_id(424242).await?.unwrap();
    assert_eq!(link.organization_id, 2);

    Ok(())
}

/// Tests that the unique guild_id constraint rejects a duplicate link.
///
/// The one-link-per-guild invariant is enforced by the schema, not only by
/// handler discipline.
///
/// Expected: Err on the second insert for the same guild
#[tokio::test]
async fn duplicate_guild_link_is_rejected() -> Result<(), DbErr> {
    let db = setup().await;
    let repo = GuildLinkRepository::new(db);

    repo.create(link_param(424242, 1)).await?;
    let duplicate = repo.create(link_param(424242, 2)).await;

    assert!(duplicate.is_err());

    Ok(())
}
