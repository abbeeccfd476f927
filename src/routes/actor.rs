use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::non_empty;
use crate::{
    AppState,
    error::AppResult,
    models::{Actor, Stored},
    store::ActorStore,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/Ator/buscar/nome/{nome}", get(by_name))
        .route("/api/Ator/buscar/nacionalidade/{nacionalidade}", get(by_nationality))
}

async fn by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Stored<Actor>>>> {
    non_empty(ActorStore::by_name(&state.db, &name).await?)
}

async fn by_nationality(
    State(state): State<Arc<AppState>>,
    Path(nationality): Path<String>,
) -> AppResult<Json<Vec<Stored<Actor>>>> {
    non_empty(ActorStore::by_nationality(&state.db, &nationality).await?)
}
