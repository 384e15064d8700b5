use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) avatar_url: Option<String>,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, DomainError>;
}
