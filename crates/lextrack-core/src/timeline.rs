//! Timeline presentation assembler
//!
//! Maps activity event types to presentation categories (icon/color keys for
//! the rendering layer) and groups consecutive same-category entries. The
//! mapping is total: event types written by a newer schema fall back to the
//! generic [`Category::History`]. No re-sorting happens here; the repository
//! delivers activities newest-first and that order is preserved.

use serde::Serialize;

use crate::model::Activity;

/// Presentation category attached to each timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Chat,
    Document,
    Research,
    Hearing,
    Status,
    Note,
    Notice,
    Case,
    History,
}

impl Category {
    /// Icon key for the rendering layer
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Chat => "message-square",
            Category::Document => "file-text",
            Category::Research => "book-open",
            Category::Hearing => "calendar",
            Category::Status => "target",
            Category::Note => "edit",
            Category::Notice => "bell",
            Category::Case => "briefcase",
            Category::History => "history",
        }
    }

    /// Color key for the rendering layer
    pub fn color(&self) -> &'static str {
        match self {
            Category::Chat => "blue",
            Category::Document => "green",
            Category::Research => "indigo",
            Category::Hearing => "yellow",
            Category::Status => "gray",
            Category::Note => "gray",
            Category::Notice => "orange",
            Category::Case => "dark",
            Category::History => "gray",
        }
    }
}

/// Total mapping from a persisted event-type string to its category
///
/// Unrecognized types render with the generic history category so that rows
/// written by newer versions still display.
pub fn category_for(kind: &str) -> Category {
    match kind {
        "AI_CHAT" => Category::Chat,
        "DRAFT_CREATED" | "DOCUMENT_UPLOADED" => Category::Document,
        "SUMMARY_CREATED" | "RESEARCH_DONE" => Category::Research,
        "HEARING_ADDED" | "HEARING_UPDATED" => Category::Hearing,
        "STATUS_CHANGED" => Category::Status,
        "NOTE_ADDED" => Category::Note,
        "NOTICE_CREATED" => Category::Notice,
        "CASE_CREATED" | "CASE_UPDATED" | "CLIENT_LINKED" => Category::Case,
        _ => Category::History,
    }
}

/// One activity annotated with its presentation category
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimelineEntry<'a> {
    #[serde(flatten)]
    pub activity: &'a Activity,
    pub category: Category,
    pub icon: &'static str,
    pub color: &'static str,
}

/// A run of consecutive entries sharing one category
#[derive(Debug, Clone, Serialize)]
pub struct TimelineGroup<'a> {
    pub category: Category,
    pub entries: Vec<TimelineEntry<'a>>,
}

/// Annotate activities with categories, preserving input order
pub fn assemble(activities: &[Activity]) -> impl Iterator<Item = TimelineEntry<'_>> {
    activities.iter().map(|activity| {
        let category = category_for(&activity.kind);
        TimelineEntry {
            activity,
            category,
            icon: category.icon(),
            color: category.color(),
        }
    })
}

/// Group consecutive same-category entries into runs, once through, in order
///
/// Grouping is strictly local: two runs of the same category separated by a
/// different category stay separate.
pub fn group_consecutive(activities: &[Activity]) -> Vec<TimelineGroup<'_>> {
    let mut groups: Vec<TimelineGroup<'_>> = Vec::new();
    for entry in assemble(activities) {
        match groups.last_mut() {
            Some(group) if group.category == entry.category => group.entries.push(entry),
            _ => groups.push(TimelineGroup {
                category: entry.category,
                entries: vec![entry],
            }),
        }
    }
    groups
}
