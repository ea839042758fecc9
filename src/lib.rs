pub mod client;
pub mod config;
pub mod handlers;
pub mod posts;
pub mod templates;
pub mod users;
pub mod views;

pub mod core {
    pub mod errors;
    pub mod fetch;
    pub mod helpers;
    pub mod query_params;
    pub mod static_server;
    pub mod transport;
}

pub mod models {
    pub mod models;
}

pub use crate::client::FeedClient;
pub use crate::core::errors::FetchError;
pub use crate::core::fetch::Fetched;
pub use crate::models::models::{Post, User};

// === Component entrypoint ===
#[cfg(target_arch = "wasm32")]
mod component {
    use spin_sdk::{
        http::{IntoResponse, Request},
        http_component,
    };

    use crate::client::FeedClient;
    use crate::config::AppConfig;
    use crate::core::transport::SpinTransport;
    use crate::handlers;

    #[http_component]
    async fn handle(req: Request) -> anyhow::Result<impl IntoResponse> {
        let config = AppConfig::from_env();
        let client = FeedClient::new(SpinTransport::new(&config.backend_url));
        Ok(handlers::dispatch(&req, &client, &config).await)
    }
}
