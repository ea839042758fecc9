//! HTML building blocks. Everything taken from backend data is escaped here.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use std::sync::OnceLock;

use crate::config::DEFAULT_PROFILE_USER;
use crate::core::helpers::{format_date, format_join_date, format_number};
use crate::models::models::{Post, User};

pub const APP_NAME: &str = "Twitter Clone";

const LAYOUT: &str = include_str!("../static/layout.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
    Info,
}

impl BannerKind {
    fn class(self) -> &'static str {
        match self {
            BannerKind::Error => "banner-error",
            BannerKind::Warning => "banner-warning",
            BannerKind::Info => "banner-info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSize {
    Small,
    Medium,
    Large,
}

impl AvatarSize {
    fn class(self) -> &'static str {
        match self {
            AvatarSize::Small => "avatar-sm",
            AvatarSize::Medium => "avatar-md",
            AvatarSize::Large => "avatar-lg",
        }
    }
}

/// Full document around `content`. `current_path` picks the active nav link.
pub fn layout(title: &str, current_path: &str, profile_user: &str, content: &str) -> String {
    let full_title = if title.is_empty() {
        APP_NAME.to_string()
    } else {
        format!("{} / {}", title, APP_NAME)
    };

    fill_layout(&[
        ("PAGE_TITLE", &encode_text(&full_title)),
        ("PAGE_NAV", &navbar(current_path, profile_user)),
        ("PAGE_CONTENT", content),
    ])
}

/// Single pass over the layout; inserted text is never rescanned.
fn fill_layout(slots: &[(&str, &str)]) -> String {
    let mut html = String::with_capacity(LAYOUT.len());
    let mut rest = LAYOUT;

    loop {
        let next = slots
            .iter()
            .filter_map(|&(name, value)| rest.find(name).map(|at| (at, name, value)))
            .min_by_key(|&(at, _, _)| at);
        let Some((at, name, value)) = next else {
            break;
        };
        html.push_str(&rest[..at]);
        html.push_str(value);
        rest = &rest[at + name.len()..];
    }
    html.push_str(rest);
    html
}

pub fn navbar(current_path: &str, profile_user: &str) -> String {
    let profile_href = format!("/users/{}", urlencoding::encode(profile_user));
    let links = [
        ("Home", "/".to_string(), current_path == "/"),
        ("Explore", "/explore".to_string(), current_path == "/explore"),
        ("Profile", profile_href, current_path.starts_with("/users/")),
    ];

    let items: String = links
        .iter()
        .map(|(label, href, active)| {
            format!(
                r#"<a class="navbar-link{}" href="{}">{}</a>"#,
                if *active { " active" } else { "" },
                encode_double_quoted_attribute(href),
                label
            )
        })
        .collect();

    format!(
        r#"<nav class="navbar"><div class="navbar-inner"><a class="navbar-brand" href="/">{}</a>{}</div></nav>"#,
        APP_NAME, items
    )
}

pub fn loading_spinner(message: &str) -> String {
    format!(
        r#"<div class="spinner-wrap"><div class="spinner"></div><p>{}</p></div>"#,
        encode_text(message)
    )
}

pub fn banner(kind: BannerKind, message: &str) -> String {
    format!(
        r#"<div class="banner {}"><p>{}</p></div>"#,
        kind.class(),
        encode_text(message)
    )
}

pub fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty-state"><p>{}</p></div>"#, encode_text(message))
}

pub fn user_avatar(user: &User, size: AvatarSize, show_verified: bool) -> String {
    let inner = match &user.profile_image {
        Some(src) => format!(
            r#"<img src="{}" alt="{}'s avatar">"#,
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(&user.username)
        ),
        None => {
            let initial: String = user
                .username
                .chars()
                .take(1)
                .flat_map(char::to_uppercase)
                .collect();
            format!("<span>{}</span>", encode_text(&initial))
        }
    };
    let badge = if show_verified && user.verified {
        r#"<span class="avatar-badge" title="Verified">✓</span>"#
    } else {
        ""
    };

    format!(
        r#"<div class="avatar {}"><div class="avatar-img">{}</div>{}</div>"#,
        size.class(),
        inner,
        badge
    )
}

fn url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"https?://[^\s<>]+").expect("Regex should compile"))
}

/// Escapes post text and turns http(s) URLs into links.
pub fn linkify(content: &str) -> String {
    let mut html = String::with_capacity(content.len());
    let mut last = 0;

    for m in url_regex().find_iter(content) {
        html.push_str(&encode_text(&content[last..m.start()]));
        html.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            encode_double_quoted_attribute(m.as_str()),
            encode_text(m.as_str())
        ));
        last = m.end();
    }
    html.push_str(&encode_text(&content[last..]));
    html
}

pub fn post_card(post: &Post, now: DateTime<Utc>) -> String {
    let author = &post.user;
    let verified = if author.verified {
        r#"<span class="verified">✓</span>"#
    } else {
        ""
    };

    format!(
        r#"<article class="post-card" data-post-id="{id}">{avatar}<div class="post-body"><div class="post-meta"><a class="post-author" href="/users/{href}">{name}</a>{verified}<span>@{username}</span><span>·</span><time datetime="{created}">{date}</time></div><p class="post-content">{content}</p><div class="post-actions"><span class="action-replies" title="Replies">💬 {replies}</span><span class="action-reposts" title="Reposts">🔁 {reposts}</span><span class="action-likes" title="Likes">♥ {likes}</span></div></div></article>"#,
        id = encode_double_quoted_attribute(&post.id),
        avatar = user_avatar(author, AvatarSize::Medium, false),
        href = encode_double_quoted_attribute(&urlencoding::encode(&author.username)),
        name = encode_text(&author.display_name),
        verified = verified,
        username = encode_text(&author.username),
        created = encode_double_quoted_attribute(&post.created_at),
        date = encode_text(&format_date(&post.created_at, now)),
        content = linkify(&post.content),
        replies = format_number(post.replies_count),
        reposts = format_number(post.reposts_count),
        likes = format_number(post.likes_count),
    )
}

pub fn post_list(posts: &[Post], empty_message: &str) -> String {
    if posts.is_empty() {
        return empty_state(empty_message);
    }
    let now = Utc::now();
    posts.iter().map(|post| post_card(post, now)).collect()
}

pub fn user_row(user: &User) -> String {
    format!(
        r#"<a class="user-row" href="/users/{href}">{avatar}<div class="user-row-names"><p>{name}</p><p class="user-row-handle">@{username}</p></div><div class="user-row-followers"><strong>{followers}</strong> followers</div></a>"#,
        href = encode_double_quoted_attribute(&urlencoding::encode(&user.username)),
        avatar = user_avatar(user, AvatarSize::Medium, true),
        name = encode_text(&user.display_name),
        username = encode_text(&user.username),
        followers = format_number(user.followers_count),
    )
}

pub fn profile_header(user: &User) -> String {
    let header_image = user
        .header_image
        .as_ref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}'s header">"#,
                encode_double_quoted_attribute(src),
                encode_double_quoted_attribute(&user.display_name)
            )
        })
        .unwrap_or_default();
    let verified = if user.verified {
        r#" <span class="verified" title="Verified">✓</span>"#
    } else {
        ""
    };
    let bio = user
        .bio
        .as_ref()
        .map(|bio| format!(r#"<p class="profile-bio">{}</p>"#, encode_text(bio)))
        .unwrap_or_default();

    format!(
        r#"<header class="page-header"><div class="profile-banner">{header_image}{avatar}</div><h1 class="profile-name">{name}{verified}</h1><p class="profile-handle">@{username}</p>{bio}<div class="profile-stats"><div><strong>{following}</strong> Following</div><div><strong>{followers}</strong> Followers</div><div>Joined {joined}</div></div></header>"#,
        header_image = header_image,
        avatar = user_avatar(user, AvatarSize::Large, false),
        name = encode_text(&user.display_name),
        verified = verified,
        username = encode_text(&user.username),
        bio = bio,
        following = format_number(user.following_count),
        followers = format_number(user.followers_count),
        joined = encode_text(&format_join_date(&user.created_at)),
    )
}

pub fn error_page(status: u16, message: &str) -> String {
    let content = format!(
        r#"<header class="page-header"><h1>{}</h1></header>{}"#,
        status,
        banner(BannerKind::Error, message)
    );
    layout(&status.to_string(), "", DEFAULT_PROFILE_USER, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::mock_users;

    #[test]
    fn linkify_escapes_text_and_links_urls() {
        let html = linkify(r#"<b>hi</b> see https://example.com/a?b=1&c="2" now"#);
        assert!(html.starts_with("&lt;b&gt;hi&lt;/b&gt; see "));
        assert!(html.contains(r#"href="https://example.com/a?b=1&amp;c=&quot;2&quot;""#));
        assert!(html.ends_with(" now"));
    }

    #[test]
    fn avatar_falls_back_to_initial() {
        let mut user = mock_users().remove(1);
        user.profile_image = None;
        let html = user_avatar(&user, AvatarSize::Small, true);
        assert!(html.contains("<span>F</span>"));
        assert!(!html.contains("avatar-badge"));

        user.display_name = "Zed".to_string();
        assert!(user_avatar(&user, AvatarSize::Small, false).contains("<span>F</span>"));
    }

    #[test]
    fn layout_does_not_rescan_inserted_text() {
        let html = layout("@PAGE_NAV", "/users/PAGE_CONTENT", "PAGE_TITLE", "<p>PAGE_NAV</p>");
        assert!(html.contains("<title>@PAGE_NAV / Twitter Clone</title>"));
        assert!(html.contains("<p>PAGE_NAV</p>"));
        assert_eq!(html.matches(r#"<nav class="navbar">"#).count(), 1);
    }

    #[test]
    fn navbar_marks_active_link() {
        let html = navbar("/explore", "techdevloper");
        assert!(html.contains(r#"<a class="navbar-link active" href="/explore">Explore</a>"#));
        assert!(html.contains(r#"href="/users/techdevloper""#));
    }
}
