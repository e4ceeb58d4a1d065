use super::*;

/// Tests resolving an organization by its external handle.
///
/// Expected: Ok(Some) for an existing handle, Ok(None) otherwise
#[tokio::test]
async fn finds_organization_by_handle() -> Result<(), DbErr> {
    let db = setup().await;

    let created = factory::organization::OrganizationFactory::new(&db)
        .handle("night-owls")
        .name("Night Owls")
        .owner_discord_id("111111")
        .build()
        .await?;

    let repo = OrganizationRepository::new(db);

    let organization = repo.find_by_handle("night-owls").await?.unwrap();
    assert_eq!(organization.id, created.id);
    assert_eq!(organization.name, "Night Owls");
    assert_eq!(organization.owner_discord_id, 111111);

    assert!(repo.find_by_handle("no-such-org").await?.is_none());

    Ok(())
}

/// Tests resolving an organization by id.
///
/// Expected: Ok(Some) for an existing id, Ok(None) otherwise
#[tokio::test]
async fn finds_organization_by_id() -> Result<(), DbErr> {
    let db = setup().await;

    let created = factory::organization::create_organization(&db).await?;

    let repo = OrganizationRepository::new(db);

    assert!(repo.find_by_id(created.id).await?.is_some());
    assert!(repo.find_by_id(created.id + 1000).await?.is_none());

    Ok(())
}
