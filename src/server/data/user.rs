//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for resolving bearer tokens to users and
//! their roles, and for bootstrapping the first admin account.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::server::model::user::Role;

/// Repository providing database operations for users, roles and access tokens.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Resolves a bearer token to its user and that user's roles.
    ///
    /// # Arguments
    /// - `token` - Raw bearer token from the `Authorization` header
    ///
    /// # Returns
    /// - `Ok(Some((user, roles)))` - Token exists and its user was found
    /// - `Ok(None)` - No such token
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<(entity::user::Model, Vec<entity::user_role::Model>)>, DbErr> {
        let Some(access_token) = entity::prelude::AccessToken::find()
            .filter(entity::access_token::Column::Token.eq(token))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let Some(user) = self.find_by_id(access_token.user_id).await? else {
            return Ok(None);
        };

        let roles = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user.id))
            .all(self.db)
            .await?;

        Ok(Some((user, roles)))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Checks whether any user holds the admin role.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::Role.eq(Role::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a user holding a single role.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created user
    /// - `Err(DbErr)` - Insert failed (e.g. duplicate email)
    pub async fn create_with_role(
        &self,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        entity::user_role::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            role: ActiveValue::Set(role.as_str().to_string()),
        }
        .insert(self.db)
        .await?;

        Ok(user)
    }

    /// Stores a new bearer token for a user.
    pub async fn issue_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<entity::access_token::Model, DbErr> {
        entity::access_token::ActiveModel {
            token: ActiveValue::Set(token.to_string()),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
