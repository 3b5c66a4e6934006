//! HTTP client for Forge API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the Forge API. Every request path is appended to a fixed API prefix
//! under the configured base URL. A non-2xx status is a successful transport
//! outcome here; interpreting it is left to the caller.

use super::error::ApiError;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

/// Fixed prefix under which all API endpoints live.
pub const API_PREFIX: &str = "/api";

/// Makes requests to the Forge API and tries to conform response data to
/// given resource types.
///
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL. The underlying client
    /// keeps a cookie store so the server session cookie rides along with
    /// every request.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Issue exactly one GET request for the path and return the raw
    /// response. No retries, no timeout, no caching.
    ///
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        Ok(self.http_client.get(self.url(path)).send().await?)
    }

    /// GET the path and decode the body as `T`. A non-2xx status becomes
    /// `ApiError::Status` without reading the body; a body on a success
    /// status that fails to decode becomes `ApiError::Http`.
    ///
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.get(path).await?;
        let status = response.status();
        if !status.is_success() {
            log::debug!("GET {} answered status {}", path, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Make a request with an optional JSON body and return the raw
    /// response.
    ///
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let mut request = self.http_client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }
}
