#[cfg(not(target_arch = "wasm32"))]
mod native {
    extern crate feedview;

    use actix_web::{web, App, HttpServer, HttpRequest, HttpResponse};
    use feedview::client::FeedClient;
    use feedview::config::AppConfig;
    use feedview::core::transport::ReqwestTransport;

    mod adapter {
        use actix_web::HttpRequest;
        use spin_sdk::http::{Request, Method};

        pub fn actix_to_spin_request(
            req: &HttpRequest,
            body: actix_web::web::Bytes,
        ) -> anyhow::Result<Request> {
            let method = match req.method().as_str() {
                "GET" => Method::Get,
                "POST" => Method::Post,
                "PUT" => Method::Put,
                "DELETE" => Method::Delete,
                "HEAD" => Method::Head,
                "OPTIONS" => Method::Options,
                "PATCH" => Method::Patch,
                other => anyhow::bail!("unsupported method {}", other),
            };

            let mut builder = Request::builder();
            builder.method(method).uri(req.uri().to_string());
            for (name, value) in req.headers() {
                if let Ok(val_str) = value.to_str() {
                    builder.header(name.as_str(), val_str);
                }
            }

            Ok(builder.body(body.to_vec()).build())
        }

        pub fn spin_to_actix_response(spin_resp: spin_sdk::http::Response) -> actix_web::HttpResponse {
            let status = actix_web::http::StatusCode::from_u16(*spin_resp.status())
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);

            let mut response = actix_web::HttpResponse::build(status);
            for (name, value) in spin_resp.headers() {
                if let Some(val_str) = value.as_str() {
                    response.insert_header((name, val_str));
                }
            }

            response.body(spin_resp.body().to_vec())
        }
    }

    struct AppState {
        client: FeedClient<ReqwestTransport>,
        config: AppConfig,
    }

    fn init_tracing() {
        let env_filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "feedview=info,actix_web=info".to_string());
        let json_logs = std::env::var("LOG_FORMAT")
            .map(|v| v == "json")
            .unwrap_or(false);

        if json_logs {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .json()
                .init();
        } else {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
        }
    }

    pub async fn run() -> std::io::Result<()> {
        dotenvy::dotenv().ok();
        init_tracing();

        let config = AppConfig::from_env();
        let bind_addr = config.bind_addr.clone();
        tracing::info!(
            backend = %config.backend_url,
            fallback = %config.fallback,
            "listening on http://{}",
            bind_addr
        );

        let state = web::Data::new(AppState {
            client: FeedClient::new(ReqwestTransport::new(&config.backend_url)),
            config,
        });

        HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::route().to(handle_all))
        })
        .bind(bind_addr)?
        .run()
        .await
    }

    async fn handle_all(req: HttpRequest, body: web::Bytes, state: web::Data<AppState>) -> HttpResponse {
        let spin_req = match adapter::actix_to_spin_request(&req, body) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "rejecting request");
                return HttpResponse::MethodNotAllowed().body("Method not allowed");
            }
        };

        let spin_resp = feedview::handlers::dispatch(&spin_req, &state.client, &state.config).await;
        adapter::spin_to_actix_response(spin_resp)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
