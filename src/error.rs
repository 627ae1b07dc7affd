use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;
use uuid::Uuid;

use crate::db::StoreError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::DuplicateKey(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            ApiError::Validation(ValidationError::MissingFields(fields)) => {
                Some(json!({ "missing": fields }))
            }
            ApiError::Validation(ValidationError::InvalidEnum { field, allowed }) => {
                Some(json!({ "field": field, "allowed": allowed }))
            }
            ApiError::Validation(ValidationError::InvalidField { field, reason }) => {
                Some(json!({ "field": field, "reason": reason }))
            }
            _ => None,
        }
    }

    /// Message safe to show to clients. Storage internals stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Store(StoreError::DuplicateKey(_) | StoreError::NotFound { .. }) => {
                self.to_string()
            }
            ApiError::Store(StoreError::CorruptRecord(_)) => {
                "Stored record could not be decoded".to_string()
            }
            ApiError::Store(_) => "Database error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let mut body = json!({
            "success": false,
            "error": self.public_message(),
        });
        if let Some(details) = self.details() {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

pub fn panic_layer() -> CatchPanicLayer<fn(Box<dyn std::any::Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic)
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let panic_message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(
        request_id = %request_id,
        panic_message = %panic_message,
        "Handler panicked"
    );

    let body = json!({
        "success": false,
        "error": "Internal server error",
        "requestId": request_id,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
