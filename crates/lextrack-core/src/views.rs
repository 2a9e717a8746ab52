//! Aggregation views over a case collection
//!
//! Pure filters and projections backing the case list endpoint's query
//! parameters.
//! Every function here borrows the input slice and returns references; no
//! function touches the clock except [`upcoming_hearings`], which takes `now`
//! explicitly so callers (and tests) control it.

use chrono::{DateTime, Utc};

use crate::model::{Case, CaseStatus, CaseType};

/// Case-insensitive substring search over title, CNR number, petitioner and
/// respondent. A case matches if any field matches. An empty or
/// whitespace-only query passes everything through.
pub fn filter_by_search<'a>(cases: &'a [Case], query: &str) -> Vec<&'a Case> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return cases.iter().collect();
    }
    cases
        .iter()
        .filter(|c| {
            let fields = [
                Some(c.title.as_str()),
                c.cnr_number.as_deref(),
                c.petitioner.as_deref(),
                c.respondent.as_deref(),
            ];
            fields
                .into_iter()
                .flatten()
                .any(|f| f.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Keep only cases with the given status
pub fn filter_by_status(cases: &[Case], status: CaseStatus) -> Vec<&Case> {
    cases.iter().filter(|c| c.status == status).collect()
}

/// Keep only cases with the given type
pub fn filter_by_case_type(cases: &[Case], case_type: CaseType) -> Vec<&Case> {
    cases.iter().filter(|c| c.case_type == case_type).collect()
}

/// Cases still being worked: status outside the terminal set
pub fn open_cases(cases: &[Case]) -> Vec<&Case> {
    cases.iter().filter(|c| !c.status.is_terminal()).collect()
}

/// Exact complement of [`open_cases`]: status in the terminal set
pub fn archived_cases(cases: &[Case]) -> Vec<&Case> {
    cases.iter().filter(|c| c.status.is_terminal()).collect()
}

/// Cases flagged URGENT or HIGH priority
pub fn urgent_cases(cases: &[Case]) -> Vec<&Case> {
    cases.iter().filter(|c| c.priority.is_urgent()).collect()
}

/// Cases with a hearing scheduled at or after `now`, soonest first
///
/// Past hearings are strictly excluded; a hearing exactly at `now` is
/// included.
pub fn upcoming_hearings(cases: &[Case], now: DateTime<Utc>) -> Vec<&Case> {
    let mut hits: Vec<&Case> = cases
        .iter()
        .filter(|c| c.next_hearing.is_some_and(|h| h >= now))
        .collect();
    hits.sort_by_key(|c| c.next_hearing);
    hits
}
