use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, FromRow)]
pub struct Submission {
    pub id: i64,
    pub student_name: String,
    pub work_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: i64,
    pub number: String,
    #[sqlx(rename = "type")]
    pub room_type: String,
    pub capacity: i64,
    pub price: f64,
    /// JSON array of labels; may be NULL for rows written outside the service.
    pub amenities: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Validated submission ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub student_name: String,
    pub work_type: WorkType,
    pub content: String,
}

/// Validated room fields, used for both insert and full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub number: String,
    pub room_type: String,
    pub capacity: i64,
    pub price: f64,
    pub amenities: Vec<String>,
    pub status: String,
}

pub const DEFAULT_ROOM_STATUS: &str = "available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    RoomRequest,
    Report,
    FinancialReport,
}

impl WorkType {
    pub const ALL: [WorkType; 3] = [
        WorkType::RoomRequest,
        WorkType::Report,
        WorkType::FinancialReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::RoomRequest => "room_request",
            WorkType::Report => "report",
            WorkType::FinancialReport => "financial_report",
        }
    }

    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(WorkType::as_str).collect()
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown work type '{}'", s))
    }
}

pub fn encode_amenities(amenities: &[String]) -> String {
    // A slice of strings always serializes.
    serde_json::to_string(amenities).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_amenities(raw: Option<&str>) -> Result<Vec<String>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_type_parses_only_known_values() {
        assert_eq!("room_request".parse::<WorkType>(), Ok(WorkType::RoomRequest));
        assert_eq!("report".parse::<WorkType>(), Ok(WorkType::Report));
        assert_eq!(
            "financial_report".parse::<WorkType>(),
            Ok(WorkType::FinancialReport)
        );
        assert!("Report".parse::<WorkType>().is_err());
        assert!("bogus".parse::<WorkType>().is_err());
    }

    #[test]
    fn amenities_round_trip_preserves_order() {
        let cases: Vec<Vec<String>> = vec![
            vec![],
            vec!["WiFi".into()],
            vec!["TV".into(), "WiFi".into(), "TV".into()],
            vec!["Mini \"Bar\"".into(), "Ocean, view".into(), "café".into()],
        ];
        for amenities in cases {
            let encoded = encode_amenities(&amenities);
            assert_eq!(decode_amenities(Some(&encoded)).unwrap(), amenities);
        }
    }

    #[test]
    fn missing_amenities_decode_to_empty() {
        assert!(decode_amenities(None).unwrap().is_empty());
        assert!(decode_amenities(Some("")).unwrap().is_empty());
        assert!(decode_amenities(Some("null")).unwrap().is_empty());
        assert!(decode_amenities(Some("{not json")).is_err());
    }
}
