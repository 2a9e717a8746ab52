//! Generated artifacts: drafts, notices, research entries, summaries,
//! uploads, and notifications.
//!
//! Artifacts are owner-scoped and may optionally link to a case. The link is
//! a weak reference: deleting a case does not cascade into artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated legal document draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub user_id: String,
    pub case_id: Option<String>,
    /// Template key, e.g. "rent", "nda", "affidavit"
    pub draft_type: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A generated legal notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub user_id: String,
    pub case_id: Option<String>,
    pub notice_type: String,
    pub recipient: String,
    pub subject: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A saved legal research query and its answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchEntry {
    pub id: String,
    pub user_id: String,
    pub case_id: Option<String>,
    pub query: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// A saved judgment/document summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: String,
    pub user_id: String,
    pub case_id: Option<String>,
    pub title: String,
    pub content: String,
    /// Length of the source text in characters; the source itself is not
    /// retained
    pub source_chars: u32,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a file attached to a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub user_id: String,
    pub case_id: String,
    pub filename: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// An in-app notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = Draft {
            id: "d-1".to_string(),
            user_id: "u-1".to_string(),
            case_id: None,
            draft_type: "rent".to_string(),
            title: "Rental Agreement".to_string(),
            content: "...".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("draftType").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_notification_round_trip() {
        let n = Notification {
            id: "n-1".to_string(),
            user_id: "u-1".to_string(),
            title: "Hearing tomorrow".to_string(),
            message: "State vs. Rao is listed for 10am".to_string(),
            read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&n).unwrap();
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
