//! Executes core `HttpRequest`s over the network with ureq.
//!
//! Status codes are returned as data (`http_status_as_error(false)`) so the
//! core decides what a 404 or 500 means. Every request carries a fresh
//! `x-request-id` for correlating viewer and server logs.

use catalog_core::{
    ApiError, FetchTicket, HttpMethod, HttpRequest, HttpResponse, PageResult, ProductService,
};
use tracing::{debug, info_span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let request_id = Uuid::new_v4();
        let url = req.url();
        let span = info_span!("http", method = req.method.as_str(), %url, %request_id);
        let _enter = span.enter();

        let mut builder = match req.method {
            HttpMethod::Get => self.agent.get(&url),
        };
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = builder.header(REQUEST_ID_HEADER, request_id.to_string());

        let mut response = builder.call().map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Execute the request named by `ticket` and decode the page.
    pub fn fetch(&self, service: &ProductService, ticket: FetchTicket) -> Result<PageResult, ApiError> {
        let req = service.build_find_all_paginated(ticket.request());
        service.parse_find_all_paginated(self.execute(&req)?)
    }
}
