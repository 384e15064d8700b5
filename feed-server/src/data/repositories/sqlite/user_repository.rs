use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::data::repositories::sqlite::{from_millis, map_db_error, to_millis};
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    avatar_url: Option<String>,
    created_at: i64,
    updated_at: i64,
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let now = to_millis(Utc::now());

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, name, avatar_url, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, email, name, avatar_url, created_at, updated_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.name)
        .bind(&input.avatar_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, &format!("user email: {}", input.email)))?;

        map_row_to_user(row)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, avatar_url, created_at, updated_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        row.map(map_row_to_user).transpose()
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    User::new(
        row.id,
        row.email,
        row.name,
        row.avatar_url,
        from_millis(row.created_at)?,
        from_millis(row.updated_at)?,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}
