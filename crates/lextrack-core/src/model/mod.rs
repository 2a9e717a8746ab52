pub mod activity;
pub mod artifact;
pub mod case;

pub use activity::{Activity, ActivityDraft, ActivityKind, Feature};
pub use artifact::{Draft, Notice, Notification, ResearchEntry, Summary, UploadedFile};
pub use case::{Case, CasePatch, CaseStage, CaseStatus, CaseType, Priority};
