use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;
use crate::transform::{submission_view, SubmissionView};
use crate::validation::{validate_submission, SubmissionPayload};

pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SubmissionView>>>, ApiError> {
    let rows = state.store.list_submissions().await?;
    let submissions = rows
        .iter()
        .map(submission_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ApiResponse::list(submissions)))
}

pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmissionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionView>>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = validate_submission(payload)?;

    let row = state.store.create_submission(&new).await?;
    tracing::info!(
        "Submission {} received from {} ({})",
        row.id,
        row.student_name,
        row.work_type
    );

    let submission = submission_view(&row)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(submission).with_message("Submission received")),
    ))
}
