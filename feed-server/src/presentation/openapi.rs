use utoipa::OpenApi;

use crate::presentation::handlers::comments::{CommentDto, CreateCommentDto};
use crate::presentation::handlers::posts::{
    CreatePostDto, ListPostsQuery, PostDto, UpdatePostDto,
};
use crate::presentation::handlers::sessions::{
    CleanupSessionsDto, CreateSessionDto, CreatedSessionDto, SessionValidationDto,
    ValidateSessionQuery,
};
use crate::presentation::handlers::users::{CreateUserDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::users::create_user,
        crate::presentation::handlers::users::get_user,
        crate::presentation::handlers::sessions::create_session,
        crate::presentation::handlers::sessions::validate_session,
        crate::presentation::handlers::sessions::delete_session,
        crate::presentation::handlers::sessions::cleanup_sessions,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::list_recent_posts,
        crate::presentation::handlers::posts::list_user_posts,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::list_comments
    ),
    components(
        schemas(
            CreateUserDto,
            UserDto,
            CreateSessionDto,
            CreatedSessionDto,
            ValidateSessionQuery,
            SessionValidationDto,
            CleanupSessionsDto,
            CreatePostDto,
            UpdatePostDto,
            ListPostsQuery,
            PostDto,
            CreateCommentDto,
            CommentDto
        )
    ),
    tags(
        (name = "users", description = "User endpoints"),
        (name = "sessions", description = "Bearer-token session endpoints"),
        (name = "posts", description = "Post endpoints"),
        (name = "comments", description = "Comment endpoints")
    )
)]
pub(crate) struct ApiDoc;
