use super::*;

/// Tests resolving a token to its user and roles.
///
/// Expected: Ok(Some((user, [host, guest])))
#[tokio::test]
async fn resolves_user_and_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db)
        .role("host")
        .role("guest")
        .token("host-token")
        .build()
        .await?;

    let (found, roles) = UserRepository::new(db)
        .find_by_token("host-token")
        .await?
        .unwrap();

    let mut roles: Vec<_> = roles.into_iter().map(|r| r.role).collect();
    roles.sort();

    assert_eq!(found.id, user.id);
    assert_eq!(roles, vec!["guest".to_string(), "host".to_string()]);

    Ok(())
}

/// Tests an unknown token.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).token("known").build().await?;

    let result = UserRepository::new(db).find_by_token("unknown").await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that issued tokens resolve to their user.
///
/// Expected: Ok(Some) for the issued token
#[tokio::test]
async fn issued_token_resolves() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create_with_role("Support", "support@example.com", Role::Support)
        .await?;
    repo.issue_token(user.id, "support-token").await?;

    let (found, roles) = repo.find_by_token("support-token").await?.unwrap();

    assert_eq!(found.id, user.id);
    assert_eq!(roles[0].role, "support");

    Ok(())
}
