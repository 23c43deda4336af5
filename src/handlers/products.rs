use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    db,
    error::AppResult,
    models::{Product, ProductPayload, PRODUCT_DELETED},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let start = Instant::now();
    let products = db::fetch_all_products(&state.db).await?;

    debug!(
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok(Json(products))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Product>> {
    let Path(id) = id?;
    let product = db::fetch_product_by_id(&state.db, id).await?;
    Ok(Json(product))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Json(payload) = payload?;
    let new_product = payload.validate()?;

    let product = db::insert_product(&state.db, &new_product).await?;

    info!(id = product.id, name = %product.name, "Created product");

    Ok(Json(product))
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Full replace: every column is rewritten from the payload. The row is looked
/// up first, so an unknown id is a 404 even when the body would not validate.
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Path(id) = id?;
    db::fetch_product_by_id(&state.db, id).await?;

    let Json(payload) = payload?;
    let new_product = payload.validate()?;

    let product = db::update_product(&state.db, id, &new_product).await?;

    info!(id, "Updated product");

    Ok(Json(product))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Value>> {
    let Path(id) = id?;
    db::delete_product(&state.db, id).await?;

    info!(id, "Deleted product");

    Ok(Json(json!({ "message": PRODUCT_DELETED })))
}
