use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::data::repositories::sqlite::{from_millis, map_db_error, to_millis};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    image_url: Option<String>,
    created_at: i64,
    updated_at: i64,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let now = to_millis(Utc::now());

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, title, content, image_url, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            RETURNING id, user_id, title, content, image_url, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, image_url, created_at, updated_at
            FROM posts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        row.map(map_row_to_post).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Post>, DomainError> {
        // Insertion order, newest first; LIMIT -1 means unbounded in SQLite.
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, image_url, created_at, updated_at
            FROM posts
            WHERE user_id = ?1
            ORDER BY id DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit.map(i64::from).unwrap_or(-1))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, image_url, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit.map(i64::from).unwrap_or(-1))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let now = to_millis(Utc::now());

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = COALESCE(?2, title),
                content = COALESCE(?3, content),
                image_url = COALESCE(?4, image_url),
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, user_id, title, content, image_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(&patch.image_url)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post_with_comments(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| map_db_error(err, "post"))?;

        sqlx::query(
            r#"
            DELETE FROM comments
            WHERE post_id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|err| map_db_error(err, "comment"))?;

        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        tx.commit().await.map_err(|err| map_db_error(err, "post"))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.user_id,
        row.title,
        row.content,
        row.image_url,
        from_millis(row.created_at)?,
        from_millis(row.updated_at)?,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}
