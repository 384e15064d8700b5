use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{FeedClientError, FeedClientResult};
use crate::models::{Comment, CreatedSession, Post, PostPatch, SessionValidation, User};

/// Environment variable naming the server base URL for [`FeedClient::from_env`].
pub const BASE_URL_ENV: &str = "FEED_SERVER_URL";

/// HTTP client for the feed server REST API.
///
/// The client is an explicit value; construct one and pass it where it is
/// needed. There is no process-global instance.
#[derive(Debug, Clone)]
pub struct FeedClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateSessionBody {
    user_id: i64,
}

#[derive(Serialize)]
struct CreatePostBody<'a> {
    user_id: i64,
    title: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

#[derive(Serialize)]
struct CreateCommentBody<'a> {
    user_id: i64,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct CleanupBody {
    deleted: u64,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

impl FeedClient {
    /// Creates a client for the server at `base_url`,
    /// e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from the `FEED_SERVER_URL` environment variable.
    ///
    /// A missing or empty variable is a configuration error; there is no
    /// fallback URL.
    pub fn from_env() -> FeedClientResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|_| FeedClientError::Config(format!("{BASE_URL_ENV} is not set")))?;
        if base_url.trim().is_empty() {
            return Err(FeedClientError::Config(format!("{BASE_URL_ENV} is empty")));
        }
        Ok(Self::new(base_url))
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a user.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> FeedClientResult<User> {
        self.post(
            "/api/users",
            &CreateUserBody {
                email,
                name,
                avatar_url,
            },
        )
        .await
    }

    /// Fetches a user by id.
    pub async fn get_user(&self, user_id: i64) -> FeedClientResult<User> {
        self.get(&format!("/api/users/{user_id}")).await
    }

    /// Opens a session for `user_id` and returns the issued token.
    pub async fn create_session(&self, user_id: i64) -> FeedClientResult<CreatedSession> {
        self.post("/api/sessions", &CreateSessionBody { user_id })
            .await
    }

    /// Checks whether `token` names a live session.
    pub async fn validate_session(&self, token: &str) -> FeedClientResult<SessionValidation> {
        let url = format!("{}/api/sessions/validate", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[("token", token)])
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        Self::decode(response).await
    }

    /// Ends the session named by `token`; unknown tokens are a no-op.
    pub async fn delete_session(&self, token: &str) -> FeedClientResult<()> {
        self.delete(&format!("/api/sessions/{token}")).await
    }

    /// Removes all expired sessions and returns how many were deleted.
    pub async fn cleanup_sessions(&self) -> FeedClientResult<u64> {
        let url = format!("{}/api/sessions/cleanup", self.base_url);
        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        let body: CleanupBody = Self::decode(response).await?;
        Ok(body.deleted)
    }

    /// Publishes a post on behalf of `user_id`.
    pub async fn create_post(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> FeedClientResult<Post> {
        self.post(
            "/api/posts",
            &CreatePostBody {
                user_id,
                title,
                content,
                image_url,
            },
        )
        .await
    }

    /// Fetches a post by id.
    pub async fn get_post(&self, post_id: i64) -> FeedClientResult<Post> {
        self.get(&format!("/api/posts/{post_id}")).await
    }

    /// Lists the newest posts across all users, newest first.
    pub async fn recent_posts(&self, limit: Option<u32>) -> FeedClientResult<Vec<Post>> {
        self.list_posts("/api/posts", limit).await
    }

    /// Lists a single user's posts, newest first.
    pub async fn posts_by_user(
        &self,
        user_id: i64,
        limit: Option<u32>,
    ) -> FeedClientResult<Vec<Post>> {
        self.list_posts(&format!("/api/users/{user_id}/posts"), limit)
            .await
    }

    /// Applies a partial update to a post; `None` fields are left as they are.
    pub async fn update_post(&self, post_id: i64, patch: &PostPatch) -> FeedClientResult<Post> {
        let url = format!("{}/api/posts/{post_id}", self.base_url);
        let response = self
            .http
            .patch(url)
            .json(patch)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        Self::decode(response).await
    }

    /// Deletes a post together with its comments.
    pub async fn delete_post(&self, post_id: i64) -> FeedClientResult<()> {
        self.delete(&format!("/api/posts/{post_id}")).await
    }

    /// Comments on a post on behalf of `user_id`.
    pub async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> FeedClientResult<Comment> {
        self.post(
            &format!("/api/posts/{post_id}/comments"),
            &CreateCommentBody { user_id, content },
        )
        .await
    }

    /// Lists a post's comments, oldest first.
    pub async fn comments_for_post(&self, post_id: i64) -> FeedClientResult<Vec<Comment>> {
        self.get(&format!("/api/posts/{post_id}/comments")).await
    }

    async fn list_posts(&self, path: &str, limit: Option<u32>) -> FeedClientResult<Vec<Post>> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.get(url);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await.map_err(FeedClientError::from_reqwest)?;
        Self::decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> FeedClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> FeedClientResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> FeedClientResult<()> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status, response).await)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> FeedClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(FeedClientError::from);
        }
        Err(Self::error_from(status, response).await)
    }

    // The server reports errors as `{"error": "..."}`; fall back to the raw
    // status when the body is missing or not json.
    async fn error_from(status: reqwest::StatusCode, response: reqwest::Response) -> FeedClientError {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.error);
        FeedClientError::from_http_status(status, message)
    }
}
