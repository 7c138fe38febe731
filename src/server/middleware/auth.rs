use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{Actor, Role},
};

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolves the request's bearer token to an `Actor`.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, headers: &'a HeaderMap) -> Self {
        Self { db, headers }
    }

    /// Resolves the caller on endpoints that also serve anonymous users.
    ///
    /// # Returns
    /// - `Ok(Some(Actor))` - A valid bearer token was sent
    /// - `Ok(None)` - No bearer token was sent
    /// - `Err(AuthError::InvalidToken)` - A token was sent but is unknown
    pub async fn optional(&self) -> Result<Option<Actor>, AppError> {
        let Some(token) = bearer_token(self.headers) else {
            return Ok(None);
        };

        let Some((user, roles)) = UserRepository::new(self.db).find_by_token(token).await? else {
            return Err(AuthError::InvalidToken.into());
        };

        Ok(Some(Actor::from_entity(&user, roles)))
    }

    /// Requires an authenticated caller holding at least one of `roles`.
    ///
    /// An empty `roles` slice only requires authentication.
    ///
    /// # Returns
    /// - `Ok(Actor)` - Caller is authenticated and holds a required role
    /// - `Err(AuthError::MissingToken)` - No bearer token was sent
    /// - `Err(AuthError::InvalidToken)` - Token is unknown
    /// - `Err(AppError::Forbidden)` - Caller holds none of `roles`
    pub async fn require(&self, roles: &[Role]) -> Result<Actor, AppError> {
        let actor = self.optional().await?.ok_or(AuthError::MissingToken)?;

        if !roles.is_empty() && !roles.iter().any(|role| actor.has_role(*role)) {
            return Err(AppError::Forbidden(format!(
                "User {} lacks any of roles {:?}",
                actor.user_id, roles
            )));
        }

        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn parses_bearer_scheme_case_insensitively() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
