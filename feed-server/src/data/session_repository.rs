use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::session::Session;

#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub(crate) user_id: i64,
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
    pub(crate) created_at: DateTime<Utc>,
}

#[async_trait]
pub(crate) trait SessionRepository: Send + Sync {
    /// Inserts a session. Fails with `AlreadyExists` when the token collides
    /// with a stored one, so callers can retry with a fresh token.
    async fn insert_session(&self, input: NewSession) -> Result<Session, DomainError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;
    /// Returns whether a session was actually deleted.
    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError>;
    /// Deletes every session with `expires_at < now`, returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
