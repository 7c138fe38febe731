use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
    model::user::Role,
};

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

/// Expected: Ok(None) without an Authorization header
#[tokio::test]
async fn optional_without_token_is_anonymous() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let headers = HeaderMap::new();

    let actor = AuthGuard::new(db, &headers).optional().await?;

    assert!(actor.is_none());

    Ok(())
}

/// Expected: Ok(Actor) carrying the user's stored roles
#[tokio::test]
async fn resolves_token_to_actor_with_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .role("host")
        .token("host-token")
        .build()
        .await?;
    let headers = headers("Bearer host-token");

    let actor = AuthGuard::new(db, &headers).require(&[Role::Host]).await?;

    assert_eq!(actor.user_id, user.id);
    assert_eq!(actor.roles, vec![Role::Host]);

    Ok(())
}

/// Expected: Err(AuthErr(MissingToken)) without a header
#[tokio::test]
async fn require_without_token_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &headers).require(&[]).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::MissingToken))));

    Ok(())
}

/// Expected: Err(AuthErr(InvalidToken)) for an unknown token
#[tokio::test]
async fn unknown_token_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let headers = headers("Bearer nope");

    let result = AuthGuard::new(db, &headers).optional().await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InvalidToken))));

    Ok(())
}

/// Expected: Err(Forbidden) when the user holds none of the required roles
#[tokio::test]
async fn missing_role_is_forbidden() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::user::UserFactory::new(db)
        .role("guest")
        .token("guest-token")
        .build()
        .await?;
    let headers = headers("Bearer guest-token");

    let result = AuthGuard::new(db, &headers)
        .require(&[Role::Host, Role::Admin])
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}
