use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use stockroom_auth::{Permission, SecurityContext};
use stockroom_store::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

// Reads are open to both roles; mutations are admin-only, per the original
// controller's rules.
const READ: &[Permission] = &[Permission::UserRead, Permission::AdminRead];
const WRITE: &[Permission] = &[Permission::AdminWrite];
const DELETE: &[Permission] = &[Permission::AdminDelete];

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/categories", get(list_categories))
        .route("/category/:category", get(products_by_category))
        .route("/price-range", get(products_by_price_range))
        .route("/low-stock", get(low_stock))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/:id/stock", patch(update_stock))
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, READ) {
        return resp;
    }

    match services.products.list() {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, READ) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.get(id) {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Query(params): Query<SearchParams>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, READ) {
        return resp;
    }

    match services.products.search(&params.q) {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, READ) {
        return resp;
    }

    match services.products.categories() {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Path(category): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, READ) {
        return resp;
    }

    match services.products.by_category(&category) {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeParams {
    pub min_price: Decimal,
    pub max_price: Decimal,
}

pub async fn products_by_price_range(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Query(params): Query<PriceRangeParams>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, READ) {
        return resp;
    }

    match services.products.price_range(params.min_price, params.max_price) {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    #[serde(default = "default_threshold")]
    pub threshold: i64,
}

fn default_threshold() -> i64 {
    10
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Query(params): Query<LowStockParams>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, &[Permission::AdminRead]) {
        return resp;
    }

    match services.products.low_stock(params.threshold) {
        Ok(products) => Json(products).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, WRITE) {
        return resp;
    }

    match services.products.create(body.into()) {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, WRITE) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.update(id, body.into()) {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct StockParams {
    pub stock: i64,
}

pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
    Query(params): Query<StockParams>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, WRITE) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if params.stock < 0 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "stock cannot be negative",
        );
    }

    match services.products.update_stock(id, params.stock) {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = errors::require_any(&ctx, DELETE) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}
