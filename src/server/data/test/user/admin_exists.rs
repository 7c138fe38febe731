use super::*;

/// Tests detecting when an admin user exists.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_when_admin_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).role("admin").build().await?;

    assert!(UserRepository::new(db).admin_exists().await?);

    Ok(())
}

/// Tests detecting when only non-admin users exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_with_only_regular_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).role("host").build().await?;
    UserFactory::new(db).role("guest").build().await?;

    assert!(!UserRepository::new(db).admin_exists().await?);

    Ok(())
}

/// Tests that `create_with_role` produces a user the admin check sees.
///
/// Expected: Ok(false) before, Ok(true) after
#[tokio::test]
async fn create_with_admin_role_is_detected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    assert!(!repo.admin_exists().await?);

    repo.create_with_role("Root", "root@example.com", Role::Admin)
        .await?;

    assert!(repo.admin_exists().await?);

    Ok(())
}
