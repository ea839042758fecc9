use spin_sdk::http::Response;
use rust_embed::RustEmbed;
use mime_guess::from_path;

use crate::core::errors::ApiError;

#[derive(RustEmbed)]
#[folder = "static"]
struct Assets;

pub const STATIC_PREFIX: &str = "/static/";

/// Serves an embedded asset for a `/static/...` path.
pub fn serve_static(path: &str) -> anyhow::Result<Response> {
    let file_path = path.trim_start_matches(STATIC_PREFIX);

    // Templates are compiled in, not served.
    if file_path.is_empty() || file_path.ends_with(".html") {
        return Ok(ApiError::NotFound("Page not found".to_string()).into());
    }

    let Some(file) = Assets::get(file_path) else {
        tracing::debug!(path, "no such asset");
        return Ok(ApiError::NotFound("Page not found".to_string()).into());
    };

    let mime = from_path(file_path).first_or_octet_stream();

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", mime.as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(file.data.to_vec())
        .build())
}
