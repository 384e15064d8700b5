use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::comment::{Comment, CreateCommentRequest};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct PostService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
}

impl<P: PostRepository, C: CommentRepository> PostService<P, C> {
    pub(crate) fn new(posts: P, comments: C) -> Self {
        Self { posts, comments }
    }

    pub(crate) async fn create_post(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        self.posts
            .create_post(NewPost {
                user_id,
                title: req.title,
                content: req.content,
                image_url: req.image_url,
            })
            .await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn posts_by_user(
        &self,
        user_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<Post>, DomainError> {
        self.posts.list_by_user(user_id, limit).await
    }

    pub(crate) async fn recent_posts(&self, limit: Option<u32>) -> Result<Vec<Post>, DomainError> {
        self.posts.list_recent(limit).await
    }

    pub(crate) async fn update_post(
        &self,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            content: req.content,
            image_url: req.image_url,
        };

        self.posts
            .update_post(post_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))
    }

    /// Removes the post and all of its comments atomically.
    pub(crate) async fn remove_post(&self, post_id: i64) -> Result<(), DomainError> {
        let existed = self.posts.delete_post_with_comments(post_id).await?;
        if !existed {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn add_comment(
        &self,
        post_id: i64,
        user_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        self.comments
            .create_comment(NewComment {
                post_id,
                user_id,
                content: req.content,
            })
            .await
    }

    pub(crate) async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        self.comments.list_by_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::PostService;
    use crate::data::comment_repository::{CommentRepository, NewComment};
    use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
    use crate::domain::comment::{Comment, CreateCommentRequest};
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

    #[derive(Clone, Default)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        post_for_get: Arc<Mutex<Option<Post>>>,
        update_call: Arc<Mutex<Option<(i64, PostPatch)>>>,
        update_result: Arc<Mutex<Option<Post>>>,
        delete_call: Arc<Mutex<Option<i64>>>,
        delete_existed: Arc<Mutex<bool>>,
        list_calls: Arc<Mutex<Vec<Option<u32>>>>,
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_post(1, input.user_id, &input.title, &input.content))
        }

        async fn get_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn list_by_user(
            &self,
            _user_id: i64,
            limit: Option<u32>,
        ) -> Result<Vec<Post>, DomainError> {
            self.list_calls
                .lock()
                .expect("list_calls mutex poisoned")
                .push(limit);
            Ok(Vec::new())
        }

        async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Post>, DomainError> {
            self.list_calls
                .lock()
                .expect("list_calls mutex poisoned")
                .push(limit);
            Ok(Vec::new())
        }

        async fn update_post(
            &self,
            id: i64,
            patch: PostPatch,
        ) -> Result<Option<Post>, DomainError> {
            *self.update_call.lock().expect("update_call mutex poisoned") = Some((id, patch));
            Ok(self
                .update_result
                .lock()
                .expect("update_result mutex poisoned")
                .clone())
        }

        async fn delete_post_with_comments(&self, id: i64) -> Result<bool, DomainError> {
            *self.delete_call.lock().expect("delete_call mutex poisoned") = Some(id);
            Ok(*self
                .delete_existed
                .lock()
                .expect("delete_existed mutex poisoned"))
        }
    }

    #[derive(Clone, Default)]
    struct FakeCommentRepo {
        created_input: Arc<Mutex<Option<NewComment>>>,
    }

    #[async_trait]
    impl CommentRepository for FakeCommentRepo {
        async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(Comment {
                id: 1,
                post_id: input.post_id,
                user_id: input.user_id,
                content: input.content,
                created_at: Utc::now(),
            })
        }

        async fn list_by_post(&self, _post_id: i64) -> Result<Vec<Comment>, DomainError> {
            Ok(Vec::new())
        }
    }

    fn sample_post(id: i64, user_id: i64, title: &str, content: &str) -> Post {
        let now = Utc::now();
        Post::new(id, user_id, title, content, None, now, now)
            .expect("sample post must be valid")
    }

    fn service(
        posts: FakePostRepo,
        comments: FakeCommentRepo,
    ) -> PostService<FakePostRepo, FakeCommentRepo> {
        PostService::new(posts, comments)
    }

    #[tokio::test]
    async fn create_post_validates_and_forwards_normalized_input() {
        let posts = FakePostRepo::default();
        let service = service(posts.clone(), FakeCommentRepo::default());

        let req = CreatePostRequest {
            title: "  Hello  ".to_string(),
            content: "  World  ".to_string(),
            image_url: None,
        };

        let created = service.create_post(5, req).await.expect("create must succeed");
        assert_eq!(created.user_id, 5);

        let input = posts
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("create_post must be called");
        assert_eq!(input.title, "Hello");
        assert_eq!(input.content, "World");
    }

    #[tokio::test]
    async fn create_post_rejects_invalid_title() {
        let service = service(FakePostRepo::default(), FakeCommentRepo::default());

        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "ok".to_string(),
            image_url: None,
        };

        let err = service.create_post(5, req).await.expect_err("must fail");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn get_post_maps_absence_to_not_found() {
        let service = service(FakePostRepo::default(), FakeCommentRepo::default());

        let err = service.get_post(42).await.expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_forwards_partial_patch() {
        let posts = FakePostRepo::default();
        *posts
            .update_result
            .lock()
            .expect("update_result mutex poisoned") =
            Some(sample_post(9, 5, "Renamed", "Body"));
        let service = service(posts.clone(), FakeCommentRepo::default());

        let req = UpdatePostRequest {
            title: Some(" Renamed ".to_string()),
            content: None,
            image_url: None,
        };

        let updated = service.update_post(9, req).await.expect("update must succeed");
        assert_eq!(updated.title, "Renamed");

        let (id, patch) = posts
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update_post must be called");
        assert_eq!(id, 9);
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert!(patch.content.is_none());
    }

    #[tokio::test]
    async fn update_post_maps_absence_to_not_found() {
        let service = service(FakePostRepo::default(), FakeCommentRepo::default());

        let err = service
            .update_post(9, UpdatePostRequest::default())
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_post_maps_absence_to_not_found() {
        let posts = FakePostRepo::default();
        let service = service(posts.clone(), FakeCommentRepo::default());

        let err = service.remove_post(3).await.expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));

        *posts
            .delete_existed
            .lock()
            .expect("delete_existed mutex poisoned") = true;
        service.remove_post(3).await.expect("remove must succeed");
    }

    #[tokio::test]
    async fn list_operations_pass_limit_through_unchanged() {
        let posts = FakePostRepo::default();
        let service = service(posts.clone(), FakeCommentRepo::default());

        service
            .posts_by_user(1, Some(10))
            .await
            .expect("list must succeed");
        service.recent_posts(None).await.expect("list must succeed");

        let calls = posts.list_calls.lock().expect("list_calls mutex poisoned");
        assert_eq!(*calls, vec![Some(10), None]);
    }

    #[tokio::test]
    async fn add_comment_validates_content() {
        let comments = FakeCommentRepo::default();
        let service = service(FakePostRepo::default(), comments.clone());

        let err = service
            .add_comment(
                1,
                2,
                CreateCommentRequest {
                    content: "  ".to_string(),
                },
            )
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::Validation { .. }));

        let comment = service
            .add_comment(
                1,
                2,
                CreateCommentRequest {
                    content: " well said ".to_string(),
                },
            )
            .await
            .expect("comment must succeed");
        assert_eq!(comment.content, "well said");
        assert_eq!(comment.post_id, 1);
    }
}
