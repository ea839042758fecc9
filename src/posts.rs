use chrono::{Duration, Utc};

use crate::client::{path_segment, FeedClient};
use crate::core::fetch::{fetch_or_fallback, Fetched};
use crate::core::transport::Transport;
use crate::models::models::{Collection, Post};
use crate::users::mock_users;

pub const POSTS_PATH: &str = "/posts";

pub fn post_path(id: &str) -> String {
    format!("{}/{}", POSTS_PATH, path_segment(id))
}

impl<T: Transport> FeedClient<T> {
    /// All posts in server order, or the mock feed if the read fails.
    pub async fn list_posts(&self) -> Fetched<Vec<Post>> {
        fetch_or_fallback(self.transport(), POSTS_PATH, "posts", || {
            Collection::List(mock_posts())
        })
        .await
        .map(Collection::into_vec)
    }

    /// One post by id. The fallback is always the first mock post, whatever
    /// `id` was asked for.
    pub async fn get_post(&self, id: &str) -> Fetched<Post> {
        let path = post_path(id);
        fetch_or_fallback(self.transport(), &path, &format!("post {}", id), first_mock_post).await
    }

    /// Posts written by `username`, compared case-insensitively.
    pub async fn posts_by_author(&self, username: &str) -> Fetched<Vec<Post>> {
        self.list_posts().await.map(|posts| {
            posts
                .into_iter()
                .filter(|post| post.user.has_username(username))
                .collect()
        })
    }
}

fn first_mock_post() -> Post {
    let mut posts = mock_posts();
    posts.swap_remove(0)
}

/// Stand-in feed used whenever the backend cannot be read. Authors are the
/// mock users, in the same order.
pub fn mock_posts() -> Vec<Post> {
    let now = Utc::now();
    let entries = [
        (
            "1",
            "Just deployed a new Spring Boot backend with Liquibase for database migrations! #SpringBoot #Java",
            now,
            (42, 12, 5),
        ),
        (
            "2",
            "Learning Next.js and Tailwind CSS for our new project. The developer experience is amazing! 🚀",
            now - Duration::days(1),
            (24, 5, 3),
        ),
        (
            "3",
            "Just released a new open-source library for handling database migrations. Check it out on GitHub!",
            now - Duration::days(2),
            (78, 32, 14),
        ),
    ];

    entries
        .into_iter()
        .zip(mock_users())
        .map(|((id, content, created_at, (likes, reposts, replies)), user)| Post {
            id: id.to_string(),
            content: content.to_string(),
            user,
            created_at: created_at.to_rfc3339(),
            likes_count: likes,
            reposts_count: reposts,
            replies_count: replies,
            is_reply: None,
            is_repost: None,
        })
        .collect()
}
