use spin_sdk::http::{Request, Response};

use crate::client::FeedClient;
use crate::config::AppConfig;
use crate::core::errors::ApiError;
use crate::core::query_params::query_param;
use crate::core::static_server::{serve_static, STATIC_PREFIX};
use crate::core::transport::Transport;
use crate::templates;
use crate::views::{self, ExploreTab, ViewState};

const USERS_PREFIX: &str = "/users/";
const FRAGMENTS_PREFIX: &str = "/fragments";

/// Routes one UI request. Every outcome, including failures, is an HTML
/// response.
pub async fn dispatch<T: Transport>(req: &Request, client: &FeedClient<T>, config: &AppConfig) -> Response {
    let method = req.method().to_string();
    let path = req.path();

    let result = match (method.as_str(), path) {
        ("GET", "/") | ("GET", "/index.html") => home_page(config),
        ("GET", "/explore") => explore_page(req.uri(), config),
        ("GET", p) if p.starts_with(USERS_PREFIX) => profile_page(p, config),
        ("GET", "/fragments/home") => home_fragment(client, config).await,
        ("GET", "/fragments/explore") => explore_fragment(req.uri(), client, config).await,
        ("GET", p) if p.starts_with("/fragments/users/") => profile_fragment(p, client, config).await,
        ("GET", p) if p.starts_with(STATIC_PREFIX) => serve_static(p),
        _ => Ok(ApiError::NotFound("Page not found".to_string()).into()),
    };

    match result {
        Ok(response) => {
            tracing::info!(method = %method, path, status = *response.status(), "request served");
            response
        }
        Err(err) => {
            tracing::error!(method = %method, path, error = %err, "request failed");
            ApiError::from(err).into()
        }
    }
}

fn html(body: String) -> Response {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(body.into_bytes())
        .build()
}

/// Page shell: the loading state plus a placeholder the browser fills from
/// `fragment`.
fn shell(title: &str, current_path: &str, fragment: &str, loading: String, config: &AppConfig) -> Response {
    let content = format!(
        r#"<div data-fragment="{}">{}</div><noscript>{}</noscript>"#,
        html_escape::encode_double_quoted_attribute(fragment),
        loading,
        templates::banner(templates::BannerKind::Warning, "This page needs JavaScript to load its content.")
    );
    html(templates::layout(title, current_path, &config.profile_user, &content))
}

fn username_from(path: &str, prefix: &str) -> Result<String, ApiError> {
    let raw = path.trim_start_matches(prefix).trim_end_matches('/');
    let username = urlencoding::decode(raw)
        .map_err(|_| ApiError::BadRequest("Invalid username".to_string()))?
        .into_owned();

    if username.is_empty() || username.contains('/') {
        return Err(ApiError::BadRequest("Username required".to_string()));
    }
    Ok(username)
}

pub fn home_page(config: &AppConfig) -> anyhow::Result<Response> {
    Ok(shell(
        "",
        "/",
        "/fragments/home",
        views::render_home(&ViewState::Loading),
        config,
    ))
}

pub fn explore_page(uri: &str, config: &AppConfig) -> anyhow::Result<Response> {
    let tab = ExploreTab::from_query(query_param(uri, "tab").as_deref());
    let fragment = match tab {
        ExploreTab::Posts => "/fragments/explore?tab=posts",
        ExploreTab::Users => "/fragments/explore?tab=users",
    };
    Ok(shell(
        "Explore",
        "/explore",
        fragment,
        views::render_explore(&ViewState::Loading, tab),
        config,
    ))
}

pub fn profile_page(path: &str, config: &AppConfig) -> anyhow::Result<Response> {
    let username = match username_from(path, USERS_PREFIX) {
        Ok(username) => username,
        Err(err) => return Ok(err.into()),
    };
    let fragment = format!("{}/users/{}", FRAGMENTS_PREFIX, urlencoding::encode(&username));

    Ok(shell(
        &format!("@{}", username),
        path,
        &fragment,
        views::render_profile(&ViewState::Loading),
        config,
    ))
}

pub async fn home_fragment<T: Transport>(client: &FeedClient<T>, config: &AppConfig) -> anyhow::Result<Response> {
    let state = views::load_home(client, config).await;
    Ok(html(views::render_home(&state)))
}

pub async fn explore_fragment<T: Transport>(
    uri: &str,
    client: &FeedClient<T>,
    config: &AppConfig,
) -> anyhow::Result<Response> {
    let tab = ExploreTab::from_query(query_param(uri, "tab").as_deref());
    let state = views::load_explore(client, config).await;
    Ok(html(views::render_explore(&state, tab)))
}

pub async fn profile_fragment<T: Transport>(
    path: &str,
    client: &FeedClient<T>,
    config: &AppConfig,
) -> anyhow::Result<Response> {
    let username = match username_from(path, "/fragments/users/") {
        Ok(username) => username,
        Err(err) => return Ok(err.into()),
    };
    let state = views::load_profile(client, config, &username).await;
    Ok(html(views::render_profile(&state)))
}
