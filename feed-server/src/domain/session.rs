use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Bearer-token record granting a client authenticated identity until expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Session {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(
        id: i64,
        user_id: i64,
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        if user_id <= 0 {
            return Err(DomainError::Validation {
                field: "user_id",
                message: "must be > 0",
            });
        }
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::Validation {
                field: "token",
                message: "must not be empty",
            });
        }

        Ok(Self {
            id,
            user_id,
            token,
            expires_at,
            created_at,
        })
    }

    /// A session is expired once `expires_at` is not in the future.
    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::Session;

    #[test]
    fn session_new_rejects_empty_token() {
        let now = Utc::now();
        assert!(Session::new(1, 1, "", now + Duration::days(30), now).is_err());
    }

    #[test]
    fn is_expired_uses_inclusive_boundary() {
        let now = Utc::now();
        let session = Session::new(1, 1, "tok", now, now - Duration::days(1))
            .expect("session must be valid");

        assert!(session.is_expired(now));
        assert!(session.is_expired(now + Duration::seconds(1)));
        assert!(!session.is_expired(now - Duration::seconds(1)));
    }
}
