use super::*;

/// Tests deleting an existing link.
///
/// Expected: Ok(true) and the link is gone afterwards
#[tokio::test]
async fn deletes_existing_link() -> Result<(), DbErr> {
    let db = setup().await;

    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("424242")
        .build()
        .await?;

    let repo = GuildLinkRepository::new(db);

    assert!(repo.delete_by_guild_id(424242).await?);
    assert!(repo.find_by_guild_id(424242).await?.is_none());

    Ok(())
}

/// Tests deleting when no link exists.
///
/// Expected: Ok(false) and no error
#[tokio::test]
async fn delete_without_link_reports_false() -> Result<(), DbErr> {
    let db = setup().await;
    let repo = GuildLinkRepository::new(db);

    assert!(!repo.delete_by_guild_id(424242).await?);

    Ok(())
}

/// Tests that deleting one guild's link leaves other guilds untouched.
///
/// Expected: Ok with only the targeted link removed
#[tokio::test]
async fn delete_is_scoped_to_one_guild() -> Result<(), DbErr> {
    let db = setup().await;

    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("111")
        .build()
        .await?;
    factory::guild_link::GuildLinkFactory::new(&db)
        .guild_id("222")
        .build()
        .await?;

    let repo = GuildLinkRepository::new(db);

    repo.delete_by_guild_id(111).await?;

    assert!(repo.find_by_guild_id(111).await?.is_none());
    assert!(repo.find_by_guild_id(222).await?.is_some());

    Ok(())
}
