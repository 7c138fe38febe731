use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, data::user::UserRepository, error::AppError, model::user::Role,
};

const BOOTSTRAP_ADMIN_NAME: &str = "Administrator";
const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@localhost";

/// Connects to the database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates a bootstrap admin with a bearer token when no admin exists.
///
/// The token is logged once so the operator can create hosts, amenities and
/// further admins through the API.
///
/// # Returns
/// - `Ok(Some(token))` - Admin created; the token was logged
/// - `Ok(None)` - An admin already exists
/// - `Err(AppError)` - Database error
pub async fn check_for_admin(db: &DatabaseConnection) -> Result<Option<String>, AppError> {
    let repo = UserRepository::new(db);
    if repo.admin_exists().await? {
        return Ok(None);
    }

    let admin = repo
        .create_with_role(BOOTSTRAP_ADMIN_NAME, BOOTSTRAP_ADMIN_EMAIL, Role::Admin)
        .await?;
    let token = generate_token();
    repo.issue_token(admin.id, &token).await?;

    tracing::info!(
        "No admin found, created {} with bearer token: {}",
        BOOTSTRAP_ADMIN_EMAIL,
        token
    );

    Ok(Some(token))
}

fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";
    const TOKEN_LENGTH: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    /// Expected: first call creates an admin and token, second call does nothing
    #[tokio::test]
    async fn bootstraps_admin_once() -> Result<(), AppError> {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let token = check_for_admin(db).await?.expect("admin token");
        assert_eq!(token.len(), 48);

        let (_, roles) = UserRepository::new(db)
            .find_by_token(&token)
            .await?
            .expect("token resolves");
        assert_eq!(roles[0].role, Role::Admin.as_str());

        assert_eq!(check_for_admin(db).await?, None);

        Ok(())
    }
}
