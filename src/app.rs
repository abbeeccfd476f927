use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState, routes,
    store::{ActorStore, MovieActorStore, MovieStore, RatingStore},
};

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::crud::<ActorStore>())
        .merge(routes::actor::routes())
        .merge(routes::crud::<MovieStore>())
        .merge(routes::movie::routes())
        .merge(routes::crud::<MovieActorStore>())
        .merge(routes::crud::<RatingStore>())
        .merge(routes::rating::routes())
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
