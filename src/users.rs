use crate::client::{path_segment, FeedClient};
use crate::core::errors::FetchError;
use crate::core::fetch::{fetch_json, fetch_or_fallback, Fetched};
use crate::core::transport::Transport;
use crate::models::models::{Collection, User};

pub const USERS_PATH: &str = "/users";

pub fn user_by_username_path(username: &str) -> String {
    format!("{}/username/{}", USERS_PATH, path_segment(username))
}

fn find_user(users: Vec<User>, username: &str) -> Option<User> {
    users.into_iter().find(|u| u.has_username(username))
}

impl<T: Transport> FeedClient<T> {
    /// All users in server order, or the mock users if the read fails.
    pub async fn list_users(&self) -> Fetched<Vec<User>> {
        fetch_or_fallback(self.transport(), USERS_PATH, "users", || {
            Collection::List(mock_users())
        })
        .await
        .map(Collection::into_vec)
    }

    /// Looks a user up by username, ignoring case.
    ///
    /// The single-user endpoint is tried first, then a scan of the user
    /// collection, then a scan of the mock users. When nothing matches at
    /// all, the first mock user is returned.
    pub async fn get_user_by_username(&self, username: &str) -> Fetched<User> {
        let path = user_by_username_path(username);
        let direct_err = match fetch_json::<User, _>(self.transport(), &path).await {
            Ok(user) => return Fetched::Live(user),
            Err(err) => err,
        };
        tracing::debug!(error = %direct_err, username, "direct lookup failed, scanning users");

        let cause = match self.list_users().await {
            Fetched::Live(users) => match find_user(users, username) {
                Some(user) => return Fetched::Live(user),
                None => FetchError::not_found("user", username),
            },
            Fetched::Fallback { cause, .. } => cause,
        };

        tracing::warn!(error = %cause, username, "falling back to mock user data");
        let user = match find_user(mock_users(), username) {
            Some(user) => user,
            None => first_mock_user(),
        };
        Fetched::Fallback { data: user, cause }
    }
}

fn first_mock_user() -> User {
    let mut users = mock_users();
    users.swap_remove(0)
}

pub fn mock_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            username: "techdevloper".to_string(),
            display_name: "Tech Developer".to_string(),
            bio: Some("Java & Spring Boot enthusiast".to_string()),
            profile_image: Some("https://i.pravatar.cc/150?u=techdev1".to_string()),
            header_image: None,
            followers_count: 1200,
            following_count: 350,
            verified: true,
            created_at: "2023-01-01T00:00:00Z".to_string(),
        },
        User {
            id: "2".to_string(),
            username: "frontendwizard".to_string(),
            display_name: "Frontend Wizard".to_string(),
            bio: Some("UI/UX designer and frontend developer".to_string()),
            profile_image: Some("https://i.pravatar.cc/150?u=uiux2".to_string()),
            header_image: None,
            followers_count: 850,
            following_count: 420,
            verified: false,
            created_at: "2023-02-15T00:00:00Z".to_string(),
        },
        User {
            id: "3".to_string(),
            username: "opensourcehero".to_string(),
            display_name: "Open Source Hero".to_string(),
            bio: Some("Contributing to open source projects".to_string()),
            profile_image: Some("https://i.pravatar.cc/150?u=opensrc3".to_string()),
            header_image: None,
            followers_count: 3400,
            following_count: 125,
            verified: true,
            created_at: "2022-08-10T00:00:00Z".to_string(),
        },
    ]
}
