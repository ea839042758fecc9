use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    pub verified: bool,
    pub created_at: String,
}

impl User {
    /// Usernames compare case-insensitively.
    pub fn has_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    pub user: User,
    pub created_at: String,
    pub likes_count: u64,
    pub reposts_count: u64,
    pub replies_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reply: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_repost: Option<bool>,
}

/// Collection bodies come back either as a bare array or wrapped in a
/// paged envelope (`{"content": [...], "totalElements": ..}`).
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Collection<T> {
    List(Vec<T>),
    Page { content: Vec<T> },
}

impl<T> Collection<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Collection::List(items) => items,
            Collection::Page { content } => content,
        }
    }
}
