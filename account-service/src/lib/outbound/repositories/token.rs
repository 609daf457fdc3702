use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Token;
use crate::domain::auth::models::TokenId;
use crate::domain::auth::models::TokenType;
use crate::domain::auth::ports::TokenStore;
use crate::domain::user::models::UserId;

pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Result<Token, AuthError> {
        let id: i64 = row.try_get("id").map_err(db_error)?;
        let token: String = row.try_get("token").map_err(db_error)?;
        let token_type: String = row.try_get("token_type").map_err(db_error)?;
        let revoked: bool = row.try_get("revoked").map_err(db_error)?;
        let expired: bool = row.try_get("expired").map_err(db_error)?;
        let user_id: i64 = row.try_get("user_id").map_err(db_error)?;

        Ok(Token {
            id: TokenId(id),
            token,
            token_type: token_type.parse::<TokenType>()?,
            revoked,
            expired,
            user_id: UserId(user_id),
        })
    }
}

fn db_error(e: sqlx::Error) -> AuthError {
    AuthError::Database(e.to_string())
}

#[async_trait]
impl TokenStore for PostgresTokenStore {
    async fn find_all_valid_by_user(&self, user_id: UserId) -> Result<Vec<Token>, AuthError> {
        let rows = sqlx::query(
            r#"
            SELECT id, token, token_type, revoked, expired, user_id
            FROM tokens
            WHERE user_id = $1 AND (revoked = FALSE OR expired = FALSE)
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Self::map_row).collect()
    }

    async fn save(&self, user_id: UserId, token: &str) -> Result<Token, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO tokens (token, token_type, revoked, expired, user_id)
            VALUES ($1, $2, FALSE, FALSE, $3)
            RETURNING id
            "#,
        )
        .bind(token)
        .bind(TokenType::Bearer.as_str())
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        let id: i64 = row.try_get("id").map_err(db_error)?;

        Ok(Token {
            id: TokenId(id),
            token: token.to_string(),
            token_type: TokenType::Bearer,
            revoked: false,
            expired: false,
            user_id,
        })
    }

    async fn save_all(&self, tokens: Vec<Token>) -> Result<(), AuthError> {
        for token in tokens {
            sqlx::query(
                r#"
                UPDATE tokens
                SET revoked = $2, expired = $3
                WHERE id = $1
                "#,
            )
            .bind(token.id.0)
            .bind(token.revoked)
            .bind(token.expired)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        }

        Ok(())
    }
}
