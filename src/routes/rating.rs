use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use super::found;
use crate::{
    AppState,
    error::AppResult,
    models::{Rating, RatingExtreme, Stored},
    store::RatingStore,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/Avaliacao/maior-nota", get(highest_score))
        .route("/api/Avaliacao/menor-nota", get(lowest_score))
        .route("/api/Avaliacao/mais-popular", get(most_popular))
        .route("/api/Avaliacao/menos-popular", get(least_popular))
        .route("/api/Avaliacao/mais-votado", get(most_voted))
        .route("/api/Avaliacao/menos-votado", get(least_voted))
}

async fn extreme(state: &AppState, which: RatingExtreme) -> AppResult<Json<Stored<Rating>>> {
    found(RatingStore::extreme(&state.db, which).await?)
}

async fn highest_score(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Rating>>> {
    extreme(&state, RatingExtreme::HighestScore).await
}

async fn lowest_score(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Rating>>> {
    extreme(&state, RatingExtreme::LowestScore).await
}

async fn most_popular(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Rating>>> {
    extreme(&state, RatingExtreme::MostPopular).await
}

async fn least_popular(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Rating>>> {
    extreme(&state, RatingExtreme::LeastPopular).await
}

async fn most_voted(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Rating>>> {
    extreme(&state, RatingExtreme::MostVoted).await
}

async fn least_voted(State(state): State<Arc<AppState>>) -> AppResult<Json<Stored<Rating>>> {
    extreme(&state, RatingExtreme::LeastVoted).await
}
