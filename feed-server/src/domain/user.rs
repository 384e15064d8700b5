use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateUserRequest {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) avatar_url: Option<String>,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            email: normalize_email(&self.email)?,
            name: normalize_name(&self.name)?,
            avatar_url: normalize_url(self.avatar_url, "avatar_url")?,
        })
    }
}

impl User {
    pub(crate) fn new(
        id: i64,
        email: impl Into<String>,
        name: impl Into<String>,
        avatar_url: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let email = normalize_email(&email.into())?;
        let name = normalize_name(&name.into())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            email,
            name,
            avatar_url,
            created_at,
            updated_at,
        })
    }
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..100 chars",
        });
    }
    Ok(name.to_string())
}

pub(crate) fn normalize_url(
    url: Option<String>,
    field: &'static str,
) -> Result<Option<String>, DomainError> {
    match url {
        None => Ok(None),
        Some(url) => {
            let url = url.trim();
            if url.is_empty() || url.len() > 2048 {
                return Err(DomainError::Validation {
                    field,
                    message: "must be 1..2048 chars",
                });
            }
            Ok(Some(url.to_string()))
        }
    }
}
