//! Maps stored rows to the JSON shapes returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::{decode_amenities, Room, StoreError, StoreResult, Submission, WorkType};

const DEFAULT_TITLE: &str = "Untitled";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub id: i64,
    pub student_name: String,
    #[serde(rename = "type")]
    pub work_type: WorkType,
    pub title: String,
    pub description: String,
    pub data: Value,
    pub student_id: Option<Value>,
    pub student_email: Option<Value>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: i64,
    pub price: f64,
    pub amenities: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Recognized keys of a submission's `content` object.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionContent {
    title: Option<Value>,
    description: Option<Value>,
    data: Option<Value>,
    student_id: Option<Value>,
    student_email: Option<Value>,
}

fn text_or(value: Option<Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

pub fn submission_view(row: &Submission) -> StoreResult<SubmissionView> {
    let work_type = row.work_type.parse::<WorkType>().map_err(|e| {
        StoreError::CorruptRecord(format!("submission {}: {}", row.id, e))
    })?;

    let content: SubmissionContent = serde_json::from_str(&row.content).map_err(|e| {
        StoreError::CorruptRecord(format!("submission {} content: {}", row.id, e))
    })?;

    Ok(SubmissionView {
        id: row.id,
        student_name: row.student_name.clone(),
        work_type,
        title: text_or(content.title, DEFAULT_TITLE),
        description: text_or(content.description, ""),
        data: non_null(content.data).unwrap_or_else(|| Value::Object(Map::new())),
        student_id: non_null(content.student_id),
        student_email: non_null(content.student_email),
        submitted_at: row.created_at,
    })
}

pub fn room_view(row: &Room) -> StoreResult<RoomView> {
    let amenities = decode_amenities(row.amenities.as_deref()).map_err(|e| {
        StoreError::CorruptRecord(format!("room {} amenities: {}", row.id, e))
    })?;

    Ok(RoomView {
        id: row.id,
        number: row.number.clone(),
        room_type: row.room_type.clone(),
        capacity: row.capacity,
        price: row.price,
        amenities,
        status: row.status.clone(),
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission_row(work_type: &str, content: &str) -> Submission {
        Submission {
            id: 7,
            student_name: "Jane".to_string(),
            work_type: work_type.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    fn room_row(amenities: Option<&str>) -> Room {
        Room {
            id: 3,
            number: "201".to_string(),
            room_type: "Deluxe".to_string(),
            capacity: 3,
            price: 149.0,
            amenities: amenities.map(str::to_string),
            status: "available".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn submission_defaults_missing_content_fields() {
        let row = submission_row("room_request", r#"{"title":"Need AC"}"#);
        let view = submission_view(&row).unwrap();

        assert_eq!(view.work_type, WorkType::RoomRequest);
        assert_eq!(view.title, "Need AC");
        assert_eq!(view.description, "");
        assert_eq!(view.data, json!({}));
        assert_eq!(view.student_id, None);
        assert_eq!(view.student_email, None);
        assert_eq!(view.submitted_at, row.created_at);
    }

    #[test]
    fn submission_projects_all_recognized_fields() {
        let row = submission_row(
            "financial_report",
            r#"{"description":"Q3","data":{"total":1200},"studentId":"S-9","studentEmail":"j@x.edu","extra":true}"#,
        );
        let view = submission_view(&row).unwrap();

        assert_eq!(view.title, "Untitled");
        assert_eq!(view.description, "Q3");
        assert_eq!(view.data, json!({"total": 1200}));
        assert_eq!(view.student_id, Some(json!("S-9")));
        assert_eq!(view.student_email, Some(json!("j@x.edu")));
    }

    #[test]
    fn submission_serializes_with_external_names() {
        let row = submission_row("report", "{}");
        let value = serde_json::to_value(submission_view(&row).unwrap()).unwrap();

        assert_eq!(value["type"], "report");
        assert_eq!(value["studentName"], "Jane");
        assert!(value.get("submittedAt").is_some());
        assert!(value["studentId"].is_null());
        assert!(value.get("workType").is_none());
    }

    #[test]
    fn malformed_content_is_corrupt_record() {
        let err = submission_view(&submission_row("report", "{oops")).unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord(_)));

        let err = submission_view(&submission_row("essay", "{}")).unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord(_)));
    }

    #[test]
    fn room_decodes_amenities() {
        let view = room_view(&room_row(Some(r#"["WiFi","TV"]"#))).unwrap();
        assert_eq!(view.amenities, vec!["WiFi", "TV"]);

        let view = room_view(&room_row(None)).unwrap();
        assert!(view.amenities.is_empty());

        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["type"], "Deluxe");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn malformed_amenities_is_corrupt_record() {
        let err = room_view(&room_row(Some("WiFi, TV"))).unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord(_)));
    }
}
