//! Synchronous client core for the product catalog viewer.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the client sits
//! the catalog view: a small state machine that issues page fetches as
//! tickets, applies their outcomes, and renders itself as text.
//!
//! # Design
//! - `HttpClient` is stateless; it holds only `base_url`.
//! - `ProductService` maps a page/limit pair onto `GET /products`.
//! - `CatalogView` tags every fetch with a sequence number and ignores
//!   outcomes of superseded fetches.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod product;
pub mod render;
pub mod types;
pub mod view;

pub use client::HttpClient;
pub use error::{error_message, ApiError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use product::ProductService;
pub use render::{render, Theme};
pub use types::{PageRequest, PageResult, Product, ProductId};
pub use view::{Applied, CatalogView, FetchTicket, Phase, DEFAULT_PAGE_SIZE};
