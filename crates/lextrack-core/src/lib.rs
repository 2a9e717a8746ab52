//! LexTrack Core - Domain models and pure computation
//!
//! This crate provides the foundational data structures and pure logic for
//! LexTrack, including:
//! - Case and Activity models with the canonical enum vocabulary
//! - Generated artifact models (drafts, notices, research, summaries)
//! - Aggregation views over a case collection (open/archived/urgent/upcoming)
//! - The case health scorer and time-saved heuristic
//! - The timeline presentation assembler (category mapping + grouping)
//! - The structured error facility and logging facility
//!
//! Everything here is I/O-free; persistence lives in `lextrack-store` and
//! orchestration in `lextrack-engine`.

pub mod errors;
pub mod health;
pub mod logging_facility;
pub mod model;
pub mod timeline;
pub mod views;

// Re-export commonly used types
pub use errors::{ErrorKind, LexError, Result, ValidationError};
pub use health::{CaseHealth, EngagementCounters};
pub use model::{Activity, ActivityDraft, ActivityKind, Case, CaseStatus, Feature, Priority};
