use async_trait::async_trait;

use crate::core::errors::FetchError;

/// Status and body of a backend response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Read-only access to the backend. `path` is relative to the backend base
/// URL and starts with `/`.
///
/// Futures are not required to be `Send`: the Spin runtime is single
/// threaded and actix handlers run on a local executor.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<RawResponse, FetchError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn get(&self, path: &str) -> Result<RawResponse, FetchError> {
        (**self).get(path).await
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        base_url: String,
    }

    impl ReqwestTransport {
        pub fn new(base_url: &str) -> Self {
            Self::with_client(reqwest::Client::new(), base_url)
        }

        pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
            Self {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn get(&self, path: &str) -> Result<RawResponse, FetchError> {
            let url = join_url(&self.base_url, path);
            let response = self
                .client
                .get(&url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| FetchError::transport(path, e))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::transport(path, e))?;

            Ok(RawResponse::new(status, body.to_vec()))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use component::SpinTransport;

#[cfg(target_arch = "wasm32")]
mod component {
    use super::*;
    use spin_sdk::http::{Method, Request, Response};

    #[derive(Clone)]
    pub struct SpinTransport {
        base_url: String,
    }

    impl SpinTransport {
        pub fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for SpinTransport {
        async fn get(&self, path: &str) -> Result<RawResponse, FetchError> {
            let request = Request::builder()
                .method(Method::Get)
                .uri(join_url(&self.base_url, path))
                .header("Accept", "application/json")
                .build();

            let response = spin_sdk::http::send::<Request, Response>(request)
                .await
                .map_err(|e| FetchError::transport(path, e))?;

            Ok(RawResponse::new(*response.status(), response.body().to_vec()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn joins_without_doubled_slash() {
        assert_eq!(join_url("http://localhost:8080/api/", "/posts"), "http://localhost:8080/api/posts");
        assert_eq!(join_url("http://localhost:8080/api", "/users/username/bob"), "http://localhost:8080/api/users/username/bob");
    }
}
