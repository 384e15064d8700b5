pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod sessions;
pub(crate) mod users;
