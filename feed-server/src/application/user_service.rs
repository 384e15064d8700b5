use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{CreateUserRequest, User};

pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Email uniqueness is enforced by the storage layer; duplicates come
    /// back as `AlreadyExists`.
    pub(crate) async fn create_user(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        self.repo
            .create_user(NewUser {
                email: req.email,
                name: req.name,
                avatar_url: req.avatar_url,
            })
            .await
    }

    pub(crate) async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .get_user(id)
            .await?
            .ok_or(DomainError::NotFound(format!("user id: {id}")))
    }
}
