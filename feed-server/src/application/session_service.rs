use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tracing::debug;

use crate::data::session_repository::{NewSession, SessionRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct CreatedSession {
    pub(crate) session_id: i64,
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
}

/// Outcome of a token check. `user` is present exactly when the session is
/// valid: known token, unexpired, and the referenced user still exists.
#[derive(Debug, Clone)]
pub(crate) struct SessionValidation {
    pub(crate) valid: bool,
    pub(crate) user: Option<User>,
}

impl SessionValidation {
    fn invalid() -> Self {
        Self {
            valid: false,
            user: None,
        }
    }
}

pub(crate) struct SessionService<S: SessionRepository, U: UserRepository> {
    sessions: S,
    users: U,
    ttl: Duration,
}

impl<S: SessionRepository, U: UserRepository> SessionService<S, U> {
    const TOKEN_BYTES: usize = 32;
    const MAX_TOKEN_ATTEMPTS: usize = 4;

    pub(crate) fn new(sessions: S, users: U, ttl: Duration) -> Self {
        Self {
            sessions,
            users,
            ttl,
        }
    }

    /// Issues a bearer token for `user_id`. Token collisions are retried
    /// with a fresh token up to a bounded number of attempts.
    pub(crate) async fn create_session(&self, user_id: i64) -> Result<CreatedSession, DomainError> {
        for _ in 0..Self::MAX_TOKEN_ATTEMPTS {
            let now = Utc::now();
            let input = NewSession {
                user_id,
                token: generate_token(Self::TOKEN_BYTES),
                expires_at: now + self.ttl,
                created_at: now,
            };

            match self.sessions.insert_session(input).await {
                Ok(session) => {
                    return Ok(CreatedSession {
                        session_id: session.id,
                        token: session.token,
                        expires_at: session.expires_at,
                    });
                }
                Err(DomainError::AlreadyExists(_)) => {
                    debug!(user_id, "session token collision, retrying");
                }
                Err(err) => return Err(err),
            }
        }

        Err(DomainError::Unexpected(
            "session token collision retries exhausted".to_string(),
        ))
    }

    /// Read-only check: never refreshes expiry or deletes expired rows.
    pub(crate) async fn validate_session(
        &self,
        token: &str,
    ) -> Result<SessionValidation, DomainError> {
        let session = match self.sessions.find_by_token(token).await? {
            Some(session) => session,
            None => return Ok(SessionValidation::invalid()),
        };

        if session.is_expired(Utc::now()) {
            return Ok(SessionValidation::invalid());
        }

        // A deleted user leaves its sessions orphaned; treat them as invalid.
        match self.users.get_user(session.user_id).await? {
            Some(user) => Ok(SessionValidation {
                valid: true,
                user: Some(user),
            }),
            None => Ok(SessionValidation::invalid()),
        }
    }

    /// Logout. Unknown tokens are a silent no-op.
    pub(crate) async fn delete_session(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.delete_by_token(token).await?;
        Ok(())
    }

    /// Removes every session already past expiry, returns the count.
    pub(crate) async fn cleanup_expired_sessions(&self) -> Result<u64, DomainError> {
        self.sessions.delete_expired(Utc::now()).await
    }
}

fn generate_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(buf)
}
