//! Page state and page rendering. Each page is loaded into a [`ViewState`]
//! that lives for one request only.

use futures_util::future::join;

use crate::client::FeedClient;
use crate::config::{AppConfig, FallbackPolicy};
use crate::core::errors::FetchError;
use crate::core::fetch::Fetched;
use crate::core::transport::Transport;
use crate::models::models::{Post, User};
use crate::templates::{self, BannerKind};

pub const FALLBACK_NOTICE: &str = "Showing sample data: the backend could not be reached.";

pub const HOME_EMPTY: &str = "No posts found. Create your first post!";
pub const EXPLORE_POSTS_EMPTY: &str = "No posts found.";
pub const EXPLORE_USERS_EMPTY: &str = "No users found.";
pub const PROFILE_POSTS_EMPTY: &str = "No posts yet.";

pub const EXPLORE_ERROR: &str = "Error loading data. Please try again later.";
pub const PROFILE_ERROR: &str = "Error loading user profile. Please try again later.";

pub fn home_error(backend_url: &str) -> String {
    format!(
        "Error loading posts. Make sure your backend server is running at {}",
        backend_url
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Loaded(T),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub posts: Vec<Post>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreView {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user: User,
    pub posts: Vec<Post>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExploreTab {
    #[default]
    Posts,
    Users,
}

impl ExploreTab {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(tab) if tab.eq_ignore_ascii_case("users") => ExploreTab::Users,
            _ => ExploreTab::Posts,
        }
    }
}

/// Applies the fallback policy to one read. `Err` means the page should show
/// its error state.
fn settle<T>(fetched: Fetched<T>, policy: FallbackPolicy, notice: &mut Option<String>) -> Result<T, FetchError> {
    match fetched {
        Fetched::Live(data) => Ok(data),
        Fetched::Fallback { cause, .. } if policy == FallbackPolicy::Fail => Err(cause),
        Fetched::Fallback { data, .. } => {
            if policy == FallbackPolicy::Warn {
                *notice = Some(FALLBACK_NOTICE.to_string());
            }
            Ok(data)
        }
    }
}

pub async fn load_home<T: Transport>(client: &FeedClient<T>, config: &AppConfig) -> ViewState<HomeView> {
    let mut notice = None;
    match settle(client.list_posts().await, config.fallback, &mut notice) {
        Ok(posts) => ViewState::Loaded(HomeView { posts, notice }),
        Err(err) => {
            tracing::error!(error = %err, "home page failed to load");
            ViewState::Error(home_error(&config.backend_url))
        }
    }
}

/// Posts and users are requested together; neither cancels the other.
pub async fn load_explore<T: Transport>(client: &FeedClient<T>, config: &AppConfig) -> ViewState<ExploreView> {
    let (posts, users) = join(client.list_posts(), client.list_users()).await;

    let mut notice = None;
    let posts = settle(posts, config.fallback, &mut notice);
    let users = settle(users, config.fallback, &mut notice);

    match (posts, users) {
        (Ok(posts), Ok(users)) => ViewState::Loaded(ExploreView { posts, users, notice }),
        (Err(err), _) | (_, Err(err)) => {
            tracing::error!(error = %err, "explore page failed to load");
            ViewState::Error(EXPLORE_ERROR.to_string())
        }
    }
}

/// The user is resolved first, then their posts are read.
pub async fn load_profile<T: Transport>(
    client: &FeedClient<T>,
    config: &AppConfig,
    username: &str,
) -> ViewState<ProfileView> {
    let mut notice = None;
    let user = match settle(client.get_user_by_username(username).await, config.fallback, &mut notice) {
        Ok(user) => user,
        Err(err) => {
            tracing::error!(error = %err, username, "profile failed to load");
            return ViewState::Error(PROFILE_ERROR.to_string());
        }
    };

    match settle(client.posts_by_author(&user.username).await, config.fallback, &mut notice) {
        Ok(posts) => ViewState::Loaded(ProfileView { user, posts, notice }),
        Err(err) => {
            tracing::error!(error = %err, username, "profile posts failed to load");
            ViewState::Error(PROFILE_ERROR.to_string())
        }
    }
}

fn notice_banner(notice: &Option<String>) -> String {
    notice
        .as_deref()
        .map(|msg| templates::banner(BannerKind::Info, msg))
        .unwrap_or_default()
}

pub fn render_home(state: &ViewState<HomeView>) -> String {
    let body = match state {
        ViewState::Loading => templates::loading_spinner("Loading posts..."),
        ViewState::Error(msg) => templates::banner(BannerKind::Error, msg),
        ViewState::Loaded(view) => format!(
            "{}{}",
            notice_banner(&view.notice),
            templates::post_list(&view.posts, HOME_EMPTY)
        ),
    };

    format!(
        r#"<header class="page-header"><h1>{}</h1><p>A simple Twitter clone UI connected to Spring Boot backend</p></header><section><h2 class="section-title">Recent Posts</h2>{}</section>"#,
        templates::APP_NAME,
        body
    )
}

fn explore_tabs(active: ExploreTab) -> String {
    let tab = |label: &str, value: &str, is_active: bool| {
        format!(
            r#"<a class="tab{}" href="/explore?tab={}">{}</a>"#,
            if is_active { " active" } else { "" },
            value,
            label
        )
    };
    format!(
        r#"<div class="tabs">{}{}</div>"#,
        tab("Posts", "posts", active == ExploreTab::Posts),
        tab("Users", "users", active == ExploreTab::Users)
    )
}

pub fn render_explore(state: &ViewState<ExploreView>, tab: ExploreTab) -> String {
    let view = match state {
        ViewState::Loading => return templates::loading_spinner("Loading explore content..."),
        ViewState::Error(msg) => return templates::banner(BannerKind::Error, msg),
        ViewState::Loaded(view) => view,
    };

    let content = match tab {
        ExploreTab::Posts => templates::post_list(&view.posts, EXPLORE_POSTS_EMPTY),
        ExploreTab::Users if view.users.is_empty() => templates::empty_state(EXPLORE_USERS_EMPTY),
        ExploreTab::Users => view.users.iter().map(templates::user_row).collect(),
    };

    format!(
        r#"<header class="page-header"><h1>Explore</h1><p>Discover posts and users</p></header>{}{}<section>{}</section>"#,
        notice_banner(&view.notice),
        explore_tabs(tab),
        content
    )
}

pub fn render_profile(state: &ViewState<ProfileView>) -> String {
    let view = match state {
        ViewState::Loading => return templates::loading_spinner("Loading profile..."),
        ViewState::Error(msg) => return templates::banner(BannerKind::Error, msg),
        ViewState::Loaded(view) => view,
    };

    format!(
        r#"{}{}<section><h2 class="section-title">Posts</h2>{}</section>"#,
        notice_banner(&view.notice),
        templates::profile_header(&view.user),
        templates::post_list(&view.posts, PROFILE_POSTS_EMPTY)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback<T>(data: T) -> Fetched<T> {
        Fetched::Fallback {
            data,
            cause: FetchError::transport("/posts", "connection refused"),
        }
    }

    #[test]
    fn settle_follows_policy() {
        let mut notice = None;
        assert_eq!(settle(fallback(1), FallbackPolicy::Mask, &mut notice), Ok(1));
        assert_eq!(notice, None);

        assert_eq!(settle(fallback(2), FallbackPolicy::Warn, &mut notice), Ok(2));
        assert_eq!(notice.as_deref(), Some(FALLBACK_NOTICE));

        let mut notice = None;
        assert!(settle(fallback(3), FallbackPolicy::Fail, &mut notice).is_err());
        assert_eq!(settle(Fetched::Live(4), FallbackPolicy::Fail, &mut notice), Ok(4));
    }

    #[test]
    fn loading_states_render_spinners() {
        assert!(render_home(&ViewState::Loading).contains("Loading posts..."));
        assert!(render_explore(&ViewState::Loading, ExploreTab::Users).contains("Loading explore content..."));
        assert!(render_profile(&ViewState::Loading).contains("Loading profile..."));
    }

    #[test]
    fn explore_tab_from_query() {
        assert_eq!(ExploreTab::from_query(Some("Users")), ExploreTab::Users);
        assert_eq!(ExploreTab::from_query(Some("nonsense")), ExploreTab::Posts);
        assert_eq!(ExploreTab::from_query(None), ExploreTab::Posts);
    }
}
