use serde::Deserialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::db::{NewRoom, NewSubmission, WorkType, DEFAULT_ROOM_STATUS};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid {field}. Must be one of: {}", .allowed.join(", "))]
    InvalidEnum {
        field: &'static str,
        allowed: Vec<&'static str>,
    },
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Body of `POST /api/submissions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub student_name: Option<String>,
    pub work_type: Option<String>,
    pub content: Option<ContentInput>,
}

/// `content` is accepted either as JSON text or as an inline object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentInput {
    Text(String),
    Object(Map<String, Value>),
}

/// Body of `POST /api/rooms` and `PUT /api/rooms/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct RoomPayload {
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub capacity: Option<Number>,
    pub price: Option<f64>,
    pub amenities: Option<Value>,
    pub status: Option<String>,
}

/// Absent or null amenities become an empty list; anything else must be an array of text.
pub fn normalize_amenities(amenities: Option<Value>) -> Result<Vec<String>, ValidationError> {
    let invalid = || ValidationError::InvalidField {
        field: "amenities",
        reason: "must be an array of strings".to_string(),
    };

    match amenities {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(label) => Ok(label),
                _ => Err(invalid()),
            })
            .collect(),
        Some(_) => Err(invalid()),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

pub fn validate_submission(payload: SubmissionPayload) -> Result<NewSubmission, ValidationError> {
    let mut missing = Vec::new();
    if is_blank(&payload.student_name) {
        missing.push("studentName");
    }
    if is_blank(&payload.work_type) {
        missing.push("workType");
    }
    let content_missing = match &payload.content {
        None => true,
        Some(ContentInput::Text(text)) => text.trim().is_empty(),
        Some(ContentInput::Object(_)) => false,
    };
    if content_missing {
        missing.push("content");
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let (Some(student_name), Some(work_type), Some(content)) =
        (payload.student_name, payload.work_type, payload.content)
    else {
        return Err(ValidationError::MissingFields(vec![
            "studentName",
            "workType",
            "content",
        ]));
    };

    let work_type = work_type
        .parse::<WorkType>()
        .map_err(|_| ValidationError::InvalidEnum {
            field: "workType",
            allowed: WorkType::allowed(),
        })?;

    Ok(NewSubmission {
        student_name,
        work_type,
        content: normalize_content(content)?,
    })
}

/// Returns the text to store for `content`, guaranteeing it decodes as a JSON object.
pub fn normalize_content(content: ContentInput) -> Result<String, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidField {
        field: "content",
        reason,
    };

    match content {
        ContentInput::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(_)) => Ok(text),
            Ok(_) => Err(invalid("must encode a JSON object".to_string())),
            Err(e) => Err(invalid(format!("must encode a JSON object ({})", e))),
        },
        ContentInput::Object(map) => {
            serde_json::to_string(&map).map_err(|e| invalid(e.to_string()))
        }
    }
}

pub fn validate_room(payload: RoomPayload) -> Result<NewRoom, ValidationError> {
    let mut missing = Vec::new();
    if is_blank(&payload.number) {
        missing.push("number");
    }
    if is_blank(&payload.room_type) {
        missing.push("type");
    }
    // Zero counts as absent for the numeric fields.
    let capacity = payload.capacity.filter(|n| n.as_f64() != Some(0.0));
    if capacity.is_none() {
        missing.push("capacity");
    }
    let price = payload.price.filter(|p| *p != 0.0);
    if price.is_none() {
        missing.push("price");
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let (Some(number), Some(room_type), Some(capacity), Some(price)) =
        (payload.number, payload.room_type, capacity, price)
    else {
        return Err(ValidationError::MissingFields(vec![
            "number", "type", "capacity", "price",
        ]));
    };

    let capacity = capacity
        .as_i64()
        .filter(|c| *c > 0)
        .ok_or_else(|| ValidationError::InvalidField {
            field: "capacity",
            reason: "must be a positive integer".to_string(),
        })?;

    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidField {
            field: "price",
            reason: "must be a non-negative number".to_string(),
        });
    }

    let amenities = normalize_amenities(payload.amenities)?;

    let status = payload
        .status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ROOM_STATUS.to_string());

    Ok(NewRoom {
        number,
        room_type,
        capacity,
        price,
        amenities,
        status,
    })
}
