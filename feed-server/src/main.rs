use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use application::session_service::SessionService;
use application::user_service::UserService;
use data::repositories::sqlite::comment_repository::SqliteCommentRepository;
use data::repositories::sqlite::post_repository::SqlitePostRepository;
use data::repositories::sqlite::session_repository::SqliteSessionRepository;
use data::repositories::sqlite::user_repository::SqliteUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::{AppSessionService, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let user_repo = SqliteUserRepository::new(pool.clone());
    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let session_service = Arc::new(SessionService::new(
        SqliteSessionRepository::new(pool.clone()),
        user_repo,
        chrono::Duration::days(settings.session_ttl_days),
    ));
    let post_service = Arc::new(PostService::new(
        SqlitePostRepository::new(pool.clone()),
        SqliteCommentRepository::new(pool),
    ));

    spawn_session_sweeper(
        session_service.clone(),
        Duration::from_secs(settings.session_sweep_interval_secs),
    );

    let state = AppState::new(user_service, session_service, post_service);
    server::run_http(&settings, state).await
}

/// Periodic garbage collection of expired sessions. The cleanup operation
/// itself is trigger-agnostic and also reachable over HTTP.
fn spawn_session_sweeper(service: Arc<AppSessionService>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately; skip it so startup stays quiet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match service.cleanup_expired_sessions().await {
                Ok(0) => {}
                Ok(deleted) => info!(deleted, "removed expired sessions"),
                Err(err) => warn!(error = %err, "session sweep failed"),
            }
        }
    });
}
