use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use super::{found, non_empty};
use crate::{
    AppState,
    error::AppResult,
    models::{Movie, MovieSearch, Stored},
    store::MovieStore,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/Filme/por-titulo/{titulo}", get(by_title))
        .route("/api/Filme/por-ano/{ano}", get(by_year))
        .route("/api/Filme/por-genero/{genero}", get(by_genre))
        .route("/api/Filme/buscar", get(search))
        .route("/api/Filme/mais-longo", get(longest))
}

async fn by_title(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> AppResult<Json<Vec<Stored<Movie>>>> {
    non_empty(MovieStore::by_title(&state.db, &title).await?)
}

async fn by_year(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> AppResult<Json<Vec<Stored<Movie>>>> {
    non_empty(MovieStore::by_year(&state.db, year).await?)
}

async fn by_genre(
    State(state): State<Arc<AppState>>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<Stored<Movie>>>> {
    non_empty(MovieStore::by_genre(&state.db, &genre).await?)
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MovieSearch>,
) -> AppResult<Json<Vec<Stored<Movie>>>> {
    non_empty(MovieStore::search(&state.db, &q).await?)
}

async fn longest(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Movie>>> {
    found(MovieStore::longest(&state.db).await?)
}
