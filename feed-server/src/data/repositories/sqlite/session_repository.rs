use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::data::repositories::sqlite::{from_millis, map_db_error, to_millis};
use crate::data::session_repository::{NewSession, SessionRepository};
use crate::domain::error::DomainError;
use crate::domain::session::Session;

#[derive(Debug, Clone)]
pub(crate) struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    user_id: i64,
    token: String,
    expires_at: i64,
    created_at: i64,
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn insert_session(&self, input: NewSession) -> Result<Session, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (user_id, token, expires_at, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.token)
        .bind(to_millis(input.expires_at))
        .bind(to_millis(input.created_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "session token"))?;

        map_row_to_session(row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, token, expires_at, created_at
            FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "session"))?;

        row.map(map_row_to_session).transpose()
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "session"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at < ?1
            "#,
        )
        .bind(to_millis(now))
        .execute(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "session"))?;

        Ok(result.rows_affected())
    }
}

fn map_row_to_session(row: SessionRow) -> Result<Session, DomainError> {
    Session::new(
        row.id,
        row.user_id,
        row.token,
        from_millis(row.expires_at)?,
        from_millis(row.created_at)?,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}
