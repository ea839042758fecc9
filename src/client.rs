use crate::core::transport::Transport;

/// Entry point for backend reads. Post operations live in `posts`, user
/// operations in `users`.
#[derive(Clone)]
pub struct FeedClient<T> {
    transport: T,
}

impl<T: Transport> FeedClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

pub(crate) fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
