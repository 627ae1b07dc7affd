use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Hotel operations API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "submissions": {
                "list": "GET /api/submissions",
                "create": "POST /api/submissions"
            },
            "rooms": {
                "list": "GET /api/rooms",
                "create": "POST /api/rooms",
                "update": "PUT /api/rooms/:id",
                "delete": "DELETE /api/rooms/:id"
            }
        }
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "ok",
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "timestamp": Utc::now(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
