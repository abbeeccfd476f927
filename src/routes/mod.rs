pub mod actor;
pub mod movie;
pub mod rating;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Stored, Validate},
    store::Gateway,
};

/// The uniform list/get/create/update/delete/batch routes for one resource.
pub fn crud<G: Gateway>() -> Router<Arc<AppState>> {
    let base = format!("/api/{}", G::RESOURCE);

    Router::new()
        .route(&base, get(list::<G>).post(create::<G>))
        .route(&format!("{base}/"), get(list::<G>).post(create::<G>))
        .route(&format!("{base}/carga-lote"), post(create_many::<G>))
        .route(&format!("{base}/{{id}}"), get(get_one::<G>).put(update::<G>).delete(delete::<G>))
}

async fn list<G: Gateway>(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Stored<G::Data>>>> {
    Ok(Json(G::list(&state.db).await?))
}

async fn get_one<G: Gateway>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Stored<G::Data>>> {
    found(G::get(&state.db, id).await?)
}

async fn create<G: Gateway>(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let data = parse_one::<G::Data>(&body)?;
    data.validate()?;
    let stored = G::create(&state.db, data).await?;
    info!(resource = G::RESOURCE, id = stored.id, "created");

    let location = format!("/api/{}/{}", G::RESOURCE, stored.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(stored)))
}

async fn update<G: Gateway>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    body: Bytes,
) -> AppResult<StatusCode> {
    let data = parse_one::<G::Data>(&body)?;
    data.validate()?;
    match G::update(&state.db, id, data).await? {
        1 => {
            info!(resource = G::RESOURCE, id, "updated");
            Ok(StatusCode::OK)
        },
        _ => Err(AppError::NotFound),
    }
}

async fn delete<G: Gateway>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    match G::delete(&state.db, id).await? {
        1 => {
            info!(resource = G::RESOURCE, id, "deleted");
            Ok(StatusCode::OK)
        },
        _ => Err(AppError::NotFound),
    }
}

/// Accepts a JSON array. An empty body, `null` and `[]` all count as an absent
/// batch.
async fn create_many<G: Gateway>(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let batch = parse_batch::<G::Data>(&body)?;
    for data in &batch {
        data.validate()?;
    }

    let stored = G::create_many(&state.db, batch).await?;
    info!(resource = G::RESOURCE, count = stored.len(), "batch created");

    let location = format!("/api/{}", G::RESOURCE);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(stored)))
}

/// Malformed or mistyped bodies are 400s, same as for batches.
fn parse_one<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::Payload(e.to_string()))
}

fn parse_batch<T: DeserializeOwned>(body: &[u8]) -> AppResult<Vec<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest);
    }

    let batch: Option<Vec<T>> =
        serde_json::from_slice(body).map_err(|e| AppError::Payload(e.to_string()))?;
    match batch {
        Some(batch) if !batch.is_empty() => Ok(batch),
        _ => Err(AppError::BadRequest),
    }
}

/// 404 for an absent row.
pub(crate) fn found<T>(item: Option<T>) -> AppResult<Json<T>> {
    item.map(Json).ok_or(AppError::NotFound)
}

/// 404 for an empty result set.
pub(crate) fn non_empty<T>(items: Vec<T>) -> AppResult<Json<Vec<T>>> {
    if items.is_empty() { Err(AppError::NotFound) } else { Ok(Json(items)) }
}
