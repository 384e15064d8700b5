use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public user model.
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public post model.
pub struct Post {
    /// Post identifier.
    pub id: i64,
    /// Owning user identifier.
    pub user_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public comment model.
pub struct Comment {
    /// Comment identifier.
    pub id: i64,
    /// The post this comment belongs to.
    pub post_id: i64,
    /// The commenting user.
    pub user_id: i64,
    /// Comment body.
    pub content: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A freshly issued session.
pub struct CreatedSession {
    /// Session record identifier.
    pub session_id: i64,
    /// Bearer token to present on later calls.
    pub token: String,
    /// When the token stops being valid (UTC).
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Outcome of a token check; `user` is set exactly when `valid` is true.
pub struct SessionValidation {
    /// Whether the token names a live session.
    pub valid: bool,
    /// The authenticated user, when valid.
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Partial post update; `None` fields are left untouched by the server.
pub struct PostPatch {
    /// New title, if any.
    pub title: Option<String>,
    /// New body, if any.
    pub content: Option<String>,
    /// New image URL, if any.
    pub image_url: Option<String>,
}
