use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCommentRequest {
    pub(crate) content: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_comment_content(&self.content)?,
        })
    }
}

fn normalize_comment_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() || content.len() > 10_000 {
        return Err(DomainError::Validation {
            field: "content",
            message: "must be 1..10000 chars",
        });
    }
    Ok(content.to_string())
}
