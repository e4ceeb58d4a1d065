use super::*;

/// Tests finding a link by guild id.
///
/// Expected: Ok(Some) for a linked guild, Ok(None) otherwise
#[tokio::test]
async fn finds_link_by_guild_id() -> Result<(), DbErr> {
    let db = setup().await;

    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("424242")
        .organization_id(7)
        .build()
        .await?;

    let repo = GuildLinkRepository::new(db);

    let found = repo.find_by_guild_id(424242).await?;
    assert_eq!(found.unwrap().organization_id, 7);

    let missing = repo.find_by_guild_id(999999).await?;
    assert!(missing.is_none());

    Ok(())
}

/// Tests finding a link by organization id.
///
/// Expected: Ok(Some) for a linked organization, Ok(None) otherwise
#[tokio::test]
async fn finds_link_by_organization_id() -> Result<(), DbErr> {
    let db = setup().await;

    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("424242")
        .organization_id(7)
        .build()
        .await?;

    let repo = GuildLinkRepository::new(db);

    let found = repo.find_by_organization_id(7).await?;
    assert_eq!(found.unwrap().guild_id, 424242);

    let missing = repo.find_by_organization_id(8).await?;
    assert!(missing.is_none());

    Ok(())
}

/// Tests that the auto-sync flag survives the entity-to-domain conversion.
///
/// Expected: Ok with auto_sync false preserved
#[tokio::test]
async fn preserves_auto_sync_flag() -> Result<(), DbErr> {
    let db = setup().await;

    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("424242")
        .auto_sync(false)
        .build()
        .await?;

    let repo = GuildLinkRepository::new(db);
    let link = repo.find_by_guild_id(424242).await?.unwrap();

    assert!(!link.auto_sync);

    Ok(())
}
