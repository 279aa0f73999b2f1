use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const DEFAULT_PRODUCT_COUNT: u64 = 30;
pub const DEFAULT_LIMIT: u32 = 30;

const ADJECTIVES: [&str; 6] = ["Compact", "Durable", "Elegant", "Lightweight", "Classic", "Premium"];
const KINDS: [&str; 5] = ["phone", "lamp", "backpack", "kettle", "headset"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub type Catalog = Arc<Vec<Product>>;

/// Deterministic catalog of `count` products with ids `1..=count`.
pub fn seed_catalog(count: u64) -> Vec<Product> {
    (1..=count)
        .map(|id| {
            let adjective = ADJECTIVES[(id as usize) % ADJECTIVES.len()];
            let kind = KINDS[(id as usize) % KINDS.len()];
            Product {
                id,
                title: format!("{adjective} {kind} #{id}"),
                thumbnail: format!("https://cdn.example.com/products/{id}/thumbnail.webp"),
                description: format!(
                    "{adjective} {kind} built for everyday use. Catalog item number {id}."
                ),
            }
        })
        .collect()
}

pub fn app() -> Router {
    app_with_catalog(seed_catalog(DEFAULT_PRODUCT_COUNT))
}

pub fn app_with_catalog(products: Vec<Product>) -> Router {
    let catalog: Catalog = Arc::new(products);
    Router::new()
        .route("/products", get(list_products))
        .with_state(catalog)
}

pub async fn run_with_catalog(
    listener: TcpListener,
    products: Vec<Product>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_catalog(products)).await
}

async fn list_products(
    State(catalog): State<Catalog>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductPage>, (StatusCode, Json<ErrorBody>)> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if page == 0 || limit == 0 {
        tracing::info!(page, limit, "rejecting page request");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                message: "page and limit must be at least 1".to_string(),
            }),
        ));
    }

    let skip = (u64::from(page) - 1) * u64::from(limit);
    let products: Vec<Product> = catalog
        .iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(limit as usize)
        .cloned()
        .collect();
    tracing::info!(page, limit, returned = products.len(), "serving products");

    Ok(Json(ProductPage {
        products,
        total: catalog.len() as u64,
        page,
        limit,
    }))
}
