mod find;
mod permission;

use sea_orm::{DatabaseConnection, DbErr};
use test_utils::builder::TestBuilder;
use test_utils::factory;

use crate::data::organization::OrganizationRepository;
use crate::data::{OrganizationStore, PermissionChecker};

async fn setup() -> DatabaseConnection {
    let test = TestBuilder::new()
        .with_bridge_tables()
        .build()
        .await
        .unwrap();
    test.db.as_ref().unwrap().clone()
}
