use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, routes};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;
    let app = app
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.http_request_timeout_secs,
        )))
        .layer(GlobalConcurrencyLimitLayer::new(
            settings.http_concurrency_limit,
        ))
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ));

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    routes::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::Duration;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::post_service::PostService;
    use crate::application::session_service::SessionService;
    use crate::application::user_service::UserService;
    use crate::data::repositories::sqlite::comment_repository::SqliteCommentRepository;
    use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
    use crate::data::repositories::sqlite::session_repository::SqliteSessionRepository;
    use crate::data::repositories::sqlite::tests::test_pool;
    use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
    use crate::presentation::AppState;

    use super::build_router;

    async fn test_router() -> Router {
        let pool = test_pool().await;

        let user_repo = SqliteUserRepository::new(pool.clone());
        let state = AppState::new(
            Arc::new(UserService::new(user_repo.clone())),
            Arc::new(SessionService::new(
                SqliteSessionRepository::new(pool.clone()),
                user_repo,
                Duration::days(30),
            )),
            Arc::new(PostService::new(
                SqlitePostRepository::new(pool.clone()),
                SqliteCommentRepository::new(pool),
            )),
        );

        build_router(state)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request must build"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request must build"),
        };

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("request must not fail");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body must be readable")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body must be json")
        };

        (status, value)
    }

    async fn create_user(router: &Router, email: &str) -> i64 {
        let (status, body) = send(
            router,
            Method::POST,
            "/api/users",
            Some(json!({ "email": email, "name": "Test User" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().expect("user id must be an integer")
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let router = test_router().await;

        let (status, body) = send(&router, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn session_lifecycle_over_http() {
        let router = test_router().await;
        let user_id = create_user(&router, "session@example.com").await;

        let (status, created) = send(
            &router,
            Method::POST,
            "/api/sessions",
            Some(json!({ "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let token = created["token"].as_str().expect("token must be a string");
        assert_eq!(token.len(), 64);
        assert!(created["session_id"].as_i64().is_some());

        let (status, validation) = send(
            &router,
            Method::GET,
            &format!("/api/sessions/validate?token={token}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(validation["valid"], true);
        assert_eq!(validation["user"]["id"], user_id);
        assert_eq!(validation["user"]["email"], "session@example.com");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/api/sessions/{token}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, validation) = send(
            &router,
            Method::GET,
            &format!("/api/sessions/validate?token={token}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(validation["valid"], false);
        assert!(validation["user"].is_null());
    }

    #[tokio::test]
    async fn deleting_unknown_session_is_a_noop() {
        let router = test_router().await;

        let (status, _) = send(
            &router,
            Method::DELETE,
            "/api/sessions/never-issued-token",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn session_for_unknown_user_is_rejected() {
        let router = test_router().await;

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/sessions",
            Some(json!({ "user_id": 9999 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_user_email_conflicts() {
        let router = test_router().await;
        create_user(&router, "dup@example.com").await;

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/users",
            Some(json!({ "email": "dup@example.com", "name": "Another" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn post_and_comment_cascade_over_http() {
        let router = test_router().await;
        let user_id = create_user(&router, "author@example.com").await;

        let (status, post) = send(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({ "user_id": user_id, "title": "Hello", "content": "World" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let post_id = post["id"].as_i64().expect("post id must be an integer");
        assert_eq!(post["created_at"], post["updated_at"]);

        let (status, comment) = send(
            &router,
            Method::POST,
            &format!("/api/posts/{post_id}/comments"),
            Some(json!({ "user_id": user_id, "content": "First!" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(comment["post_id"], post_id);

        let (status, comments) = send(
            &router,
            Method::GET,
            &format!("/api/posts/{post_id}/comments"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(comments.as_array().expect("array").len(), 1);

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/api/posts/{post_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::GET, &format!("/api/posts/{post_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, comments) = send(
            &router,
            Method::GET,
            &format!("/api/posts/{post_id}/comments"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(comments.as_array().expect("array").is_empty());

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/api/posts/{post_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_updates_only_supplied_fields() {
        let router = test_router().await;
        let user_id = create_user(&router, "author@example.com").await;

        let (_, post) = send(
            &router,
            Method::POST,
            "/api/posts",
            Some(json!({ "user_id": user_id, "title": "Before", "content": "Body" })),
        )
        .await;
        let post_id = post["id"].as_i64().expect("post id must be an integer");

        let (status, updated) = send(
            &router,
            Method::PATCH,
            &format!("/api/posts/{post_id}"),
            Some(json!({ "title": "After" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "After");
        assert_eq!(updated["content"], "Body");

        let (status, _) = send(
            &router,
            Method::PATCH,
            "/api/posts/424242",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn recent_and_per_user_listings_respect_limit() {
        let router = test_router().await;
        let alice = create_user(&router, "alice@example.com").await;
        let bob = create_user(&router, "bob@example.com").await;

        for (user, title) in [(alice, "a1"), (alice, "a2"), (bob, "b1")] {
            let (status, _) = send(
                &router,
                Method::POST,
                "/api/posts",
                Some(json!({ "user_id": user, "title": title, "content": "c" })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, all) = send(&router, Method::GET, "/api/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().expect("array").len(), 3);

        let (status, capped) = send(&router, Method::GET, "/api/posts?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(capped.as_array().expect("array").len(), 2);

        let (status, alices) = send(
            &router,
            Method::GET,
            &format!("/api/users/{alice}/posts?limit=1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let alices = alices.as_array().expect("array");
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0]["title"], "a2");
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_via_cleanup_endpoint() {
        let router = test_router().await;
        let user_id = create_user(&router, "sweep@example.com").await;

        let (_, created) = send(
            &router,
            Method::POST,
            "/api/sessions",
            Some(json!({ "user_id": user_id })),
        )
        .await;
        let token = created["token"].as_str().expect("token").to_string();

        // Nothing has expired yet.
        let (status, swept) = send(&router, Method::POST, "/api/sessions/cleanup", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(swept["deleted"], 0);

        let (_, validation) = send(
            &router,
            Method::GET,
            &format!("/api/sessions/validate?token={token}"),
            None,
        )
        .await;
        assert_eq!(validation["valid"], true);
    }
}
