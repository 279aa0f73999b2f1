//! Stateless HTTP client wrapper for the catalog API.
//!
//! # Design
//! `HttpClient` holds only a `base_url`. It builds GET requests against
//! resource paths below that base and turns responses into typed values or
//! `ApiError`s. The caller executes the actual HTTP round-trip between
//! `build_get` and `parse_json`, keeping this crate free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Shared client configured with a base endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request for `path` below the base URL.
    pub fn build_get(&self, path: &str, query: &[(&str, String)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{}", self.base_url, path.trim_start_matches('/')),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Check the status and decode the JSON body.
    pub fn parse_json<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
