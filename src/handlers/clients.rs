use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    db,
    error::{AppError, AppResult},
    models::{Client, ClientPayload, CLIENT_DELETED},
    AppState,
};

fn log_conflict(err: AppError, cpf: &str) -> AppError {
    if err.is_unique_violation() {
        warn!(cpf, "Client rejected by unique constraint");
    }
    err
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let start = Instant::now();
    let clients = db::fetch_all_clients(&state.db).await?;

    debug!(
        count = clients.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed clients"
    );

    Ok(Json(clients))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Client>> {
    let Path(id) = id?;
    let client = db::fetch_client_by_id(&state.db, id).await?;
    Ok(Json(client))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientPayload>, JsonRejection>,
) -> AppResult<Json<Client>> {
    let Json(payload) = payload?;
    let new_client = payload.validate()?;

    let client = db::insert_client(&state.db, &new_client)
        .await
        .map_err(|e| log_conflict(e, &new_client.cpf))?;

    info!(id = client.id, name = %client.name, "Created client");

    Ok(Json(client))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ClientPayload>, JsonRejection>,
) -> AppResult<Json<Client>> {
    let Path(id) = id?;
    db::fetch_client_by_id(&state.db, id).await?;

    let Json(payload) = payload?;
    let new_client = payload.validate()?;

    let client = db::update_client(&state.db, id, &new_client)
        .await
        .map_err(|e| log_conflict(e, &new_client.cpf))?;

    info!(id, "Updated client");

    Ok(Json(client))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_client(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Value>> {
    let Path(id) = id?;
    db::delete_client(&state.db, id).await?;

    info!(id, "Deleted client");

    Ok(Json(json!({ "message": CLIENT_DELETED })))
}
