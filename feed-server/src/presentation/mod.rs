use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::application::session_service::SessionService;
use crate::application::user_service::UserService;
use crate::data::repositories::sqlite::comment_repository::SqliteCommentRepository;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::data::repositories::sqlite::session_repository::SqliteSessionRepository;
use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type AppUserService = UserService<SqliteUserRepository>;
pub(crate) type AppSessionService = SessionService<SqliteSessionRepository, SqliteUserRepository>;
pub(crate) type AppPostService = PostService<SqlitePostRepository, SqliteCommentRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) user_service: Arc<AppUserService>,
    pub(crate) session_service: Arc<AppSessionService>,
    pub(crate) post_service: Arc<AppPostService>,
}

impl AppState {
    pub(crate) fn new(
        user_service: Arc<AppUserService>,
        session_service: Arc<AppSessionService>,
        post_service: Arc<AppPostService>,
    ) -> Self {
        Self {
            user_service,
            session_service,
            post_service,
        }
    }
}
