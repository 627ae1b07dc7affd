use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;
use crate::transform::{room_view, RoomView};
use crate::validation::{validate_room, RoomPayload};

fn room_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::BadRequest("Room id must be an integer".to_string()))
}

fn room_payload(payload: Result<Json<RoomPayload>, JsonRejection>) -> Result<RoomPayload, ApiError> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RoomView>>>, ApiError> {
    let rows = state.store.list_rooms().await?;
    let rooms = rows.iter().map(room_view).collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ApiResponse::list(rooms)))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoomPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<RoomView>>), ApiError> {
    let new = validate_room(room_payload(payload)?)?;

    let row = state.store.create_room(&new).await?;
    tracing::info!("Room {} created (id {})", row.number, row.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(room_view(&row)?).with_message("Room created")),
    ))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RoomPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<RoomView>>, ApiError> {
    let id = room_id(path)?;
    let fields = validate_room(room_payload(payload)?)?;

    let row = state.store.update_room(id, &fields).await?;
    tracing::info!("Room {} updated (id {})", row.number, row.id);

    Ok(Json(
        ApiResponse::success(room_view(&row)?).with_message("Room updated"),
    ))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = room_id(path)?;

    state.store.delete_room(id).await?;
    tracing::info!("Room id {} deleted", id);

    Ok(Json(ApiResponse::message("Room deleted")))
}
