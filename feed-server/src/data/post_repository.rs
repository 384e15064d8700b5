use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image_url: Option<String>,
}

/// `None` fields are left untouched by `update_post`.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) image_url: Option<String>,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Posts owned by `user_id`, newest insertion first.
    async fn list_by_user(&self, user_id: i64, limit: Option<u32>)
    -> Result<Vec<Post>, DomainError>;
    /// Posts across all users, most recently created first.
    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Post>, DomainError>;
    /// Applies the patch and refreshes `updated_at`; `None` when absent.
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    /// Deletes the post and all comments referencing it in one transaction.
    /// Returns whether the post existed.
    async fn delete_post_with_comments(&self, id: i64) -> Result<bool, DomainError>;
}
