//! Product service: maps page/limit pairs onto the `products` resource.
//!
//! The server interprets `page` and `limit`; nothing is sliced or filtered
//! locally and the decoded body is handed back unchanged.

use crate::client::HttpClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{PageRequest, PageResult};

const PRODUCTS_PATH: &str = "products";

#[derive(Debug, Clone)]
pub struct ProductService {
    client: HttpClient,
}

impl ProductService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// `GET {base}/products` with the server's default paging.
    pub fn build_find_all(&self) -> HttpRequest {
        self.client.build_get(PRODUCTS_PATH, &[])
    }

    /// `GET {base}/products?page={page}&limit={limit}`.
    pub fn build_find_all_paginated(&self, request: PageRequest) -> HttpRequest {
        self.client.build_get(
            PRODUCTS_PATH,
            &[
                ("page", request.page().to_string()),
                ("limit", request.limit().to_string()),
            ],
        )
    }

    pub fn parse_find_all(&self, response: HttpResponse) -> Result<PageResult, ApiError> {
        self.client.parse_json(response)
    }

    pub fn parse_find_all_paginated(&self, response: HttpResponse) -> Result<PageResult, ApiError> {
        self.client.parse_json(response)
    }
}
