pub(crate) mod post_service;
pub(crate) mod session_service;
pub(crate) mod user_service;
