//! Domain DTOs for the products API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. Public catalog APIs
//! return numeric product ids, so `ProductId` accepts a string or a number
//! and keeps the string form.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Product identifier, used as the rendering key for a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ProductId(s),
            Raw::Number(n) => ProductId(n.to_string()),
        })
    }
}

/// A single product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
}

/// One page of products plus the item count across all pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageResult {
    pub products: Vec<Product>,
    pub total: u64,
}

/// A one-based page number and a page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, ApiError> {
        if page == 0 || limit == 0 {
            return Err(ApiError::InvalidPageRequest { page, limit });
        }
        Ok(Self { page, limit })
    }

    /// First page with `limit` items; a zero limit is raised to 1.
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}
