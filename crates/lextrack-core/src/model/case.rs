use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Administrative state of a case
///
/// Distinct from [`CaseStage`], which is the procedural phase of litigation.
/// The terminal states (DISPOSED, ARCHIVED, CLOSED) partition the archived
/// view; everything else counts as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Open,
    Pending,
    Hearing,
    Reserved,
    Disposed,
    Archived,
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "OPEN",
            CaseStatus::Pending => "PENDING",
            CaseStatus::Hearing => "HEARING",
            CaseStatus::Reserved => "RESERVED",
            CaseStatus::Disposed => "DISPOSED",
            CaseStatus::Archived => "ARCHIVED",
            CaseStatus::Closed => "CLOSED",
        }
    }

    /// Parse a status string, tolerating legacy lower-case values
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(CaseStatus::Open),
            "PENDING" => Ok(CaseStatus::Pending),
            "HEARING" => Ok(CaseStatus::Hearing),
            "RESERVED" => Ok(CaseStatus::Reserved),
            "DISPOSED" => Ok(CaseStatus::Disposed),
            "ARCHIVED" => Ok(CaseStatus::Archived),
            "CLOSED" => Ok(CaseStatus::Closed),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }

    /// True for statuses that place a case in the archived partition
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaseStatus::Disposed | CaseStatus::Archived | CaseStatus::Closed
        )
    }
}

/// Matter classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseType {
    General,
    Criminal,
    Civil,
    Family,
    Property,
    Consumer,
    Labour,
    Tax,
    Corporate,
    Writ,
    Arbitration,
    ChequeBounce,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::General => "GENERAL",
            CaseType::Criminal => "CRIMINAL",
            CaseType::Civil => "CIVIL",
            CaseType::Family => "FAMILY",
            CaseType::Property => "PROPERTY",
            CaseType::Consumer => "CONSUMER",
            CaseType::Labour => "LABOUR",
            CaseType::Tax => "TAX",
            CaseType::Corporate => "CORPORATE",
            CaseType::Writ => "WRIT",
            CaseType::Arbitration => "ARBITRATION",
            CaseType::ChequeBounce => "CHEQUE_BOUNCE",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_ascii_uppercase().as_str() {
            "GENERAL" => Ok(CaseType::General),
            "CRIMINAL" => Ok(CaseType::Criminal),
            "CIVIL" => Ok(CaseType::Civil),
            "FAMILY" => Ok(CaseType::Family),
            "PROPERTY" => Ok(CaseType::Property),
            "CONSUMER" => Ok(CaseType::Consumer),
            "LABOUR" => Ok(CaseType::Labour),
            "TAX" => Ok(CaseType::Tax),
            "CORPORATE" => Ok(CaseType::Corporate),
            "WRIT" => Ok(CaseType::Writ),
            "ARBITRATION" => Ok(CaseType::Arbitration),
            "CHEQUE_BOUNCE" => Ok(CaseType::ChequeBounce),
            other => Err(ValidationError::UnknownCaseType(other.to_string())),
        }
    }
}

impl Default for CaseType {
    fn default() -> Self {
        CaseType::General
    }
}

/// Procedural phase of litigation (filing through execution)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStage {
    Filing,
    Notice,
    Appearance,
    FramingIssues,
    Evidence,
    Arguments,
    Reserved,
    Judgment,
    Appeal,
    Execution,
}

impl CaseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStage::Filing => "FILING",
            CaseStage::Notice => "NOTICE",
            CaseStage::Appearance => "APPEARANCE",
            CaseStage::FramingIssues => "FRAMING_ISSUES",
            CaseStage::Evidence => "EVIDENCE",
            CaseStage::Arguments => "ARGUMENTS",
            CaseStage::Reserved => "RESERVED",
            CaseStage::Judgment => "JUDGMENT",
            CaseStage::Appeal => "APPEAL",
            CaseStage::Execution => "EXECUTION",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_ascii_uppercase().as_str() {
            "FILING" => Ok(CaseStage::Filing),
            "NOTICE" => Ok(CaseStage::Notice),
            "APPEARANCE" => Ok(CaseStage::Appearance),
            "FRAMING_ISSUES" => Ok(CaseStage::FramingIssues),
            "EVIDENCE" => Ok(CaseStage::Evidence),
            "ARGUMENTS" => Ok(CaseStage::Arguments),
            "RESERVED" => Ok(CaseStage::Reserved),
            "JUDGMENT" => Ok(CaseStage::Judgment),
            "APPEAL" => Ok(CaseStage::Appeal),
            "EXECUTION" => Ok(CaseStage::Execution),
            other => Err(ValidationError::UnknownStage(other.to_string())),
        }
    }
}

/// Case priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            other => Err(ValidationError::UnknownPriority(other.to_string())),
        }
    }

    /// True for priorities that place a case in the urgent view
    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Case - the central entity
///
/// Every case has exactly one owner (`user_id`); all reads and writes are
/// scoped by owner. The three `*_count` fields are read-only projections
/// recomputed by the repository on load, never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Opaque stable identifier (UUID v7)
    pub id: String,

    /// Owning user id (or, for legacy rows only, an imported owner id)
    pub user_id: String,

    /// Human-readable title
    pub title: String,

    /// Court registry number (CNR), when known
    pub cnr_number: Option<String>,

    /// Court-assigned case number, when known
    pub case_number: Option<String>,

    pub case_type: CaseType,
    pub court: Option<String>,
    pub judge: Option<String>,
    pub petitioner: Option<String>,
    pub respondent: Option<String>,

    /// Weak reference to a client record; no ownership implied
    pub client_id: Option<String>,
    pub client_name: Option<String>,

    pub status: CaseStatus,
    pub stage: Option<CaseStage>,
    pub priority: Priority,

    pub filing_date: Option<DateTime<Utc>>,
    pub next_hearing: Option<DateTime<Utc>>,

    pub notes: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_prediction: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Derived counts, recomputed on load
    pub activities_count: u32,
    pub hearings_count: u32,
    pub documents_count: u32,
}

impl Case {
    /// Create a new Case with spec defaults (GENERAL / OPEN / MEDIUM)
    pub fn new(id: String, user_id: String, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title,
            cnr_number: None,
            case_number: None,
            case_type: CaseType::General,
            court: None,
            judge: None,
            petitioner: None,
            respondent: None,
            client_id: None,
            client_name: None,
            status: CaseStatus::Open,
            stage: None,
            priority: Priority::Medium,
            filing_date: None,
            next_hearing: None,
            notes: None,
            ai_summary: None,
            ai_prediction: None,
            created_at: now,
            updated_at: now,
            activities_count: 0,
            hearings_count: 0,
            documents_count: 0,
        }
    }

    /// Check if this case is in the archived partition
    pub fn is_archived(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Partial update for a Case
///
/// Fields left as `None` are preserved; updates are whole-record
/// replacements with last-writer-wins semantics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    pub title: Option<String>,
    pub cnr_number: Option<String>,
    pub case_number: Option<String>,
    pub case_type: Option<CaseType>,
    pub court: Option<String>,
    pub judge: Option<String>,
    pub petitioner: Option<String>,
    pub respondent: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub status: Option<CaseStatus>,
    pub stage: Option<CaseStage>,
    pub priority: Option<Priority>,
    pub filing_date: Option<DateTime<Utc>>,
    pub next_hearing: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_prediction: Option<String>,
}

impl CasePatch {
    /// Apply this patch to a case, returning the fields that changed
    /// in workflow-relevant ways (used for activity logging)
    pub fn apply_to(&self, case: &mut Case) -> PatchOutcome {
        let outcome = PatchOutcome {
            status_change: match self.status {
                Some(new) if new != case.status => Some((case.status, new)),
                _ => None,
            },
            hearing_added: self.next_hearing.is_some() && case.next_hearing.is_none(),
            hearing_updated: self.next_hearing.is_some()
                && case.next_hearing.is_some()
                && self.next_hearing != case.next_hearing,
            client_linked: self.client_id.is_some() && self.client_id != case.client_id,
        };

        if let Some(v) = &self.title {
            case.title = v.clone();
        }
        if let Some(v) = &self.cnr_number {
            case.cnr_number = Some(v.clone());
        }
        if let Some(v) = &self.case_number {
            case.case_number = Some(v.clone());
        }
        if let Some(v) = self.case_type {
            case.case_type = v;
        }
        if let Some(v) = &self.court {
            case.court = Some(v.clone());
        }
        if let Some(v) = &self.judge {
            case.judge = Some(v.clone());
        }
        if let Some(v) = &self.petitioner {
            case.petitioner = Some(v.clone());
        }
        if let Some(v) = &self.respondent {
            case.respondent = Some(v.clone());
        }
        if let Some(v) = &self.client_id {
            case.client_id = Some(v.clone());
        }
        if let Some(v) = &self.client_name {
            case.client_name = Some(v.clone());
        }
        if let Some(v) = self.status {
            case.status = v;
        }
        if let Some(v) = self.stage {
            case.stage = Some(v);
        }
        if let Some(v) = self.priority {
            case.priority = v;
        }
        if let Some(v) = self.filing_date {
            case.filing_date = Some(v);
        }
        if let Some(v) = self.next_hearing {
            case.next_hearing = Some(v);
        }
        if let Some(v) = &self.notes {
            case.notes = Some(v.clone());
        }
        if let Some(v) = &self.ai_summary {
            case.ai_summary = Some(v.clone());
        }
        if let Some(v) = &self.ai_prediction {
            case.ai_prediction = Some(v.clone());
        }

        case.updated_at = Utc::now();
        outcome
    }
}

/// Workflow-relevant changes detected while applying a patch
#[derive(Debug, Clone, PartialEq)]
pub struct PatchOutcome {
    pub status_change: Option<(CaseStatus, CaseStatus)>,
    pub hearing_added: bool,
    pub hearing_updated: bool,
    pub client_linked: bool,
}
