use super::*;

/// Tests the owner-based management check.
///
/// Expected: Ok(true) for the owner, Ok(false) for anyone else
#[tokio::test]
async fn owner_manages_organization() -> Result<(), DbErr> {
    let db = setup().await;

    let organization = factory::organization::OrganizationFactory::new(&db)
        .owner_discord_id("111111")
        .build()
        .await?;

    let repo = OrganizationRepository::new(db);

    assert!(repo.user_manages_organization(111111, organization.id).await?);
    assert!(!repo.user_manages_organization(222222, organization.id).await?);

    Ok(())
}

/// Tests the check against a missing organization.
///
/// Expected: Ok(false), not an error
#[tokio::test]
async fn missing_organization_is_not_managed() -> Result<(), DbErr> {
    let db = setup().await;
    let repo = OrganizationRepository::new(db);

    assert!(!repo.user_manages_organization(111111, 12345).await?);

    Ok(())
}
