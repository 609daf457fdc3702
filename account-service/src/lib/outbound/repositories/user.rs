use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Result<User, AuthError> {
        let id: i64 = row.try_get("id").map_err(db_error)?;
        let username: String = row.try_get("username").map_err(db_error)?;
        let email: String = row.try_get("email").map_err(db_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(db_error)?;
        let role: String = row.try_get("role").map_err(db_error)?;

        Ok(User {
            id: UserId(id),
            username: Username::new(username).map_err(|e| AuthError::Database(e.to_string()))?,
            email: EmailAddress::new(email).map_err(|e| AuthError::Database(e.to_string()))?,
            password_hash,
            role: role
                .parse::<Role>()
                .map_err(|e| AuthError::Database(e.to_string()))?,
        })
    }
}

fn db_error(e: sqlx::Error) -> AuthError {
    AuthError::Database(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Self::map_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Self::map_row).transpose()
    }

    async fn save(&self, user: NewUser) -> Result<User, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return AuthError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return AuthError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                }
            }
            AuthError::Database(e.to_string())
        })?;

        let id: i64 = row.try_get("id").map_err(db_error)?;

        Ok(User {
            id: UserId(id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        })
    }
}
