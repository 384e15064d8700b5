use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde::Serialize;

use super::AppState;
use super::handlers::{comments, posts, sessions, users};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/users", post(users::create_user))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/users/{id}/posts", get(posts::list_user_posts))
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/validate", get(sessions::validate_session))
        .route("/api/sessions/cleanup", post(sessions::cleanup_sessions))
        .route("/api/sessions/{token}", delete(sessions::delete_session))
        .route(
            "/api/posts",
            post(posts::create_post).get(posts::list_recent_posts),
        )
        .route(
            "/api/posts/{id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/api/posts/{id}/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
