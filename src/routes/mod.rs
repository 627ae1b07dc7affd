mod info;
mod response;
mod rooms;
mod submissions;

pub use response::ApiResponse;

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(info::index))
        .route("/health", get(info::health))
        .route(
            "/api/submissions",
            get(submissions::list_submissions).post(submissions::create_submission),
        )
        .route("/api/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/api/rooms/:id",
            put(rooms::update_room).delete(rooms::delete_room),
        )
        .fallback(info::not_found)
        .method_not_allowed_fallback(info::method_not_allowed)
        .layer(crate::error::panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
