use chrono::{DateTime, Utc};
use latchkey_core::{
    Claims, CredentialStore, CredentialStoreError, Email, HashedPassword, NewToken, Token,
    TokenId, TokenKind, User,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, migrate::MigrateError, postgres::PgRow, types::Json};

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresCredentialStore { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn user(&self, email: &Email) -> Result<User, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT email, password_hash, claims
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(CredentialStoreError::UserNotFound);
        };

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create_user(&self, user: User) -> Result<(), CredentialStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (email, password_hash, claims)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(Json(user.claims()))
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update_user(&self, user: User) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2, claims = $3
                WHERE email = $1
            "#,
        )
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(Json(user.claims()))
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_user(&self, email: &Email) -> Result<(), CredentialStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("DELETE FROM tokens WHERE email = $1")
            .bind(email.as_ref().expose_secret())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let result = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email.as_ref().expose_secret())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(unexpected)?;
            return Err(CredentialStoreError::UserNotFound);
        }

        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Storing token in PostgreSQL", skip_all)]
    async fn create_token(&self, token: NewToken) -> Result<TokenId, CredentialStoreError> {
        insert_token(&self.pool, &token).await
    }

    #[tracing::instrument(name = "Looking up tokens in PostgreSQL", skip_all)]
    async fn tokens_by_email_and_value(
        &self,
        email: &Email,
        value: &str,
    ) -> Result<Vec<Token>, CredentialStoreError> {
        let rows = sqlx::query(
            r#"
                SELECT id, email, token, kind, created_at
                FROM tokens
                WHERE email = $1 AND token = $2
                ORDER BY id
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.iter().map(token_from_row).collect()
    }

    #[tracing::instrument(name = "Deleting token from PostgreSQL", skip_all)]
    async fn delete_token(&self, id: TokenId) -> Result<(), CredentialStoreError> {
        let result = sqlx::query("DELETE FROM tokens WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::TokenNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Rotating token in PostgreSQL", skip_all)]
    async fn rotate_token(
        &self,
        consumed: TokenId,
        replacement: NewToken,
    ) -> Result<TokenId, CredentialStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        // A concurrent rotation of the same row blocks here until the first
        // commits, then sees zero affected rows.
        let deleted = sqlx::query("DELETE FROM tokens WHERE id = $1")
            .bind(consumed.value())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await.map_err(unexpected)?;
            return Err(CredentialStoreError::TokenNotFound);
        }

        let id = insert_token(&mut *tx, &replacement).await?;
        tx.commit().await.map_err(unexpected)?;

        Ok(id)
    }
}

async fn insert_token<'e, E>(
    executor: E,
    token: &NewToken,
) -> Result<TokenId, CredentialStoreError>
where
    E: sqlx::PgExecutor<'e>,
{
    let id: i64 = sqlx::query_scalar(
        r#"
            INSERT INTO tokens (email, token, kind, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(token.email.as_ref().expose_secret())
    .bind(token.value.expose_secret())
    .bind(token.kind.as_str())
    .bind(token.created_at)
    .fetch_one(executor)
    .await
    .map_err(classify)?;

    Ok(TokenId::new(id))
}

fn user_from_row(row: &PgRow) -> Result<User, CredentialStoreError> {
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let Json(claims): Json<Claims> = row.try_get("claims").map_err(unexpected)?;

    let email = Email::try_from(Secret::from(email))
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

    Ok(User::new(email, HashedPassword::from(password_hash), claims))
}

fn token_from_row(row: &PgRow) -> Result<Token, CredentialStoreError> {
    let id: i64 = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let value: String = row.try_get("token").map_err(unexpected)?;
    let kind: String = row.try_get("kind").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;

    let email = Email::try_from(Secret::from(email))
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
    let kind = TokenKind::try_from(kind.as_str())
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

    Ok(NewToken::new(email, Secret::from(value), kind, created_at).with_id(TokenId::new(id)))
}

fn classify(e: sqlx::Error) -> CredentialStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return CredentialStoreError::UserAlreadyExists;
        }
        if db_err.is_foreign_key_violation() {
            return CredentialStoreError::UserNotFound;
        }
    }
    unexpected(e)
}

fn unexpected(e: sqlx::Error) -> CredentialStoreError {
    CredentialStoreError::UnexpectedError(e.to_string())
}
