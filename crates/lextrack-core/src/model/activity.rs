use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length persisted for an activity
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum content length persisted for an activity (storage bound)
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Display truncation used by AI-output loggers (summary, research)
pub const DISPLAY_CONTENT_CHARS: usize = 2_000;

/// Truncation applied on the lossy legacy fallback path
pub const FALLBACK_CONTENT_CHARS: usize = 500;

/// Truncate a string to at most `max` characters, respecting char boundaries
pub fn clamp_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Typed vocabulary of timeline event types
///
/// This enum is the write-side boundary: feature loggers only construct
/// activities through it, so event-type strings cannot drift. The read side
/// keeps the raw string (see [`Activity::kind`]) so that rows written by
/// newer versions still render, falling back to a generic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    AiChat,
    DraftCreated,
    SummaryCreated,
    DocumentUploaded,
    HearingAdded,
    HearingUpdated,
    StatusChanged,
    NoteAdded,
    ResearchDone,
    NoticeCreated,
    ClientLinked,
    CaseCreated,
    CaseUpdated,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::AiChat => "AI_CHAT",
            ActivityKind::DraftCreated => "DRAFT_CREATED",
            ActivityKind::SummaryCreated => "SUMMARY_CREATED",
            ActivityKind::DocumentUploaded => "DOCUMENT_UPLOADED",
            ActivityKind::HearingAdded => "HEARING_ADDED",
            ActivityKind::HearingUpdated => "HEARING_UPDATED",
            ActivityKind::StatusChanged => "STATUS_CHANGED",
            ActivityKind::NoteAdded => "NOTE_ADDED",
            ActivityKind::ResearchDone => "RESEARCH_DONE",
            ActivityKind::NoticeCreated => "NOTICE_CREATED",
            ActivityKind::ClientLinked => "CLIENT_LINKED",
            ActivityKind::CaseCreated => "CASE_CREATED",
            ActivityKind::CaseUpdated => "CASE_UPDATED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AI_CHAT" => Some(ActivityKind::AiChat),
            "DRAFT_CREATED" => Some(ActivityKind::DraftCreated),
            "SUMMARY_CREATED" => Some(ActivityKind::SummaryCreated),
            "DOCUMENT_UPLOADED" => Some(ActivityKind::DocumentUploaded),
            "HEARING_ADDED" => Some(ActivityKind::HearingAdded),
            "HEARING_UPDATED" => Some(ActivityKind::HearingUpdated),
            "STATUS_CHANGED" => Some(ActivityKind::StatusChanged),
            "NOTE_ADDED" => Some(ActivityKind::NoteAdded),
            "RESEARCH_DONE" => Some(ActivityKind::ResearchDone),
            "NOTICE_CREATED" => Some(ActivityKind::NoticeCreated),
            "CLIENT_LINKED" => Some(ActivityKind::ClientLinked),
            "CASE_CREATED" => Some(ActivityKind::CaseCreated),
            "CASE_UPDATED" => Some(ActivityKind::CaseUpdated),
            _ => None,
        }
    }

    /// True for the hearing-schedule events (feeds the hearings counter)
    pub fn is_hearing_event(&self) -> bool {
        matches!(self, ActivityKind::HearingAdded | ActivityKind::HearingUpdated)
    }
}

/// Subsystem that produced an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    AiAssistant,
    DocGenerator,
    JudgmentSummarizer,
    Crm,
    CaseTracker,
    Notices,
    Drafts,
    Research,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::AiAssistant => "AI_ASSISTANT",
            Feature::DocGenerator => "DOC_GENERATOR",
            Feature::JudgmentSummarizer => "JUDGMENT_SUMMARIZER",
            Feature::Crm => "CRM",
            Feature::CaseTracker => "CASE_TRACKER",
            Feature::Notices => "NOTICES",
            Feature::Drafts => "DRAFTS",
            Feature::Research => "RESEARCH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AI_ASSISTANT" => Some(Feature::AiAssistant),
            "DOC_GENERATOR" => Some(Feature::DocGenerator),
            "JUDGMENT_SUMMARIZER" => Some(Feature::JudgmentSummarizer),
            "CRM" => Some(Feature::Crm),
            "CASE_TRACKER" => Some(Feature::CaseTracker),
            "NOTICES" => Some(Feature::Notices),
            "DRAFTS" => Some(Feature::Drafts),
            "RESEARCH" => Some(Feature::Research),
            _ => None,
        }
    }
}

/// Activity - an immutable append-only event attached to a Case
///
/// Activities are created once and never edited. `kind` is kept as the raw
/// persisted string so that unknown event types written by a newer schema
/// still load and render with the generic history category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub case_id: String,
    pub user_id: String,
    /// Event type string (canonical values come from [`ActivityKind`])
    pub kind: String,
    pub feature: Option<String>,
    pub title: String,
    pub content: String,
    pub metadata: Option<serde_json::Value>,
    /// Weak pointer to the artifact that caused the event; no referential
    /// integrity enforced
    pub reference_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Write-side input for the activity log
///
/// Built exclusively by the feature loggers; clamps are applied by the
/// writer before persistence.
#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub case_id: String,
    pub user_id: String,
    pub kind: ActivityKind,
    pub feature: Option<Feature>,
    pub title: String,
    pub content: String,
    pub metadata: Option<serde_json::Value>,
    pub reference_id: Option<String>,
}

impl ActivityDraft {
    pub fn new(
        case_id: impl Into<String>,
        user_id: impl Into<String>,
        kind: ActivityKind,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            user_id: user_id.into(),
            kind,
            feature: None,
            title: title.into(),
            content: content.into(),
            metadata: None,
            reference_id: None,
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}
