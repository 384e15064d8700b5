//! Rust client for the feed server.
//!
//! ```no_run
//! use feed_client::FeedClient;
//!
//! # async fn example() -> Result<(), feed_client::FeedClientError> {
//! let client = FeedClient::new("http://localhost:8080");
//! let user = client.create_user("ada@example.com", "Ada", None).await?;
//! let session = client.create_session(user.id).await?;
//! assert!(client.validate_session(&session.token).await?.valid);
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod models;

pub use error::{FeedClientError, FeedClientResult};
pub use http_client::{BASE_URL_ENV, FeedClient};
pub use models::{Comment, CreatedSession, Post, PostPatch, SessionValidation, User};
