use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::repositories::sqlite::{from_millis, map_db_error, to_millis};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    content: String,
    created_at: i64,
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let now = to_millis(Utc::now());

        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, content, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, post_id, user_id, content, created_at
            "#,
        )
        .bind(input.post_id)
        .bind(input.user_id)
        .bind(&input.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "comment"))?;

        map_row_to_comment(row)
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, content, created_at
            FROM comments
            WHERE post_id = ?1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "comment"))?;

        rows.into_iter().map(map_row_to_comment).collect()
    }
}

fn map_row_to_comment(row: CommentRow) -> Result<Comment, DomainError> {
    Ok(Comment {
        id: row.id,
        post_id: row.post_id,
        user_id: row.user_id,
        content: row.content,
        created_at: from_millis(row.created_at)?,
    })
}
