//! HTTP client for the remote catalogue API.
//!
//! One file per resource, each adding methods to [`CatalogueClient`]:
//!
//! | Method | Path                                  |
//! |--------|---------------------------------------|
//! | GET    | `/products`                           |
//! | GET    | `/products/search`                    |
//! | GET    | `/products/categories`                |
//! | GET    | `/products/{id}`                      |
//! | GET    | `/products/{id}/reviews`              |
//! | POST   | `/products/{id}/reviews`              |
//! | PUT    | `/products/{id}/reviews/{reviewId}`   |
//! | DELETE | `/products/{id}/reviews/{reviewId}`   |

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
};

pub mod products;
pub mod reviews;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct CatalogueClient {
    http: Client,
    base_url: String,
}

impl CatalogueClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("catalogue-review-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Send the request tagged with a fresh request id and reject any
    /// non-success status.
    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let request = request.header(REQUEST_ID_HEADER, &request_id).build()?;
        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!(request_id = %request_id, method = %method, url = %url, "request started");

        let response = self.http.execute(request).await.inspect_err(|err| {
            tracing::warn!(request_id = %request_id, error = %err, "request failed");
        })?;

        let status = response.status();
        tracing::debug!(request_id = %request_id, status = %status, "request finished");
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(AppError::NotFound),
            status => Err(AppError::Status { status, url }),
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
