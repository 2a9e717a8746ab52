//! Case health scorer
//!
//! Turns raw engagement counters into a bounded 20..=100 score plus an
//! unbounded time-saved estimate. Pure and total: any combination of
//! counters yields a score; large inputs saturate the component caps.

use serde::{Deserialize, Serialize};

/// Raw engagement counters for one case/user pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCounters {
    /// Drafts generated by the user
    pub documents_generated: u32,
    /// AI research queries + summaries
    pub ai_assists: u32,
    /// Files uploaded to the case
    pub files_uploaded: u32,
    /// Rows in the case's activity log
    pub timeline_entries: u32,
}

/// Computed health report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseHealth {
    /// 20..=100
    pub score: u32,
    /// Estimated minutes saved; unbounded
    pub estimated_time_saved: u64,
    pub counters: EngagementCounters,
}

const BASE_SCORE: u32 = 20;
const MAX_SCORE: u32 = 100;

/// Score a case from its engagement counters
///
/// base 20, +10/document (cap 30), +5/assist (cap 25), +5/upload (cap 15),
/// +2/timeline entry (cap 10), total capped at 100.
pub fn score(counters: EngagementCounters) -> CaseHealth {
    let docs = counters.documents_generated.saturating_mul(10).min(30);
    let assists = counters.ai_assists.saturating_mul(5).min(25);
    let uploads = counters.files_uploaded.saturating_mul(5).min(15);
    let timeline = counters.timeline_entries.saturating_mul(2).min(10);

    let score = (BASE_SCORE + docs + assists + uploads + timeline).min(MAX_SCORE);

    let estimated_time_saved = u64::from(counters.documents_generated) * 15
        + u64::from(counters.ai_assists) * 5
        + u64::from(counters.files_uploaded) * 2;

    CaseHealth {
        score,
        estimated_time_saved,
        counters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counters(d: u32, a: u32, f: u32, t: u32) -> EngagementCounters {
        EngagementCounters {
            documents_generated: d,
            ai_assists: a,
            files_uploaded: f,
            timeline_entries: t,
        }
    }

    #[test]
    fn test_zero_engagement_scores_base() {
        let health = score(EngagementCounters::default());
        assert_eq!(health.score, 20);
        assert_eq!(health.estimated_time_saved, 0);
    }

    #[test]
    fn test_known_scenario() {
        // 2 docs, 3 assists, 1 upload, 4 timeline entries
        let health = score(counters(2, 3, 1, 4));
        assert_eq!(health.score, 68);
        assert_eq!(health.estimated_time_saved, 47);
    }

    #[test]
    fn test_component_caps() {
        // each component individually saturated
        assert_eq!(score(counters(100, 0, 0, 0)).score, 50);
        assert_eq!(score(counters(0, 100, 0, 0)).score, 45);
        assert_eq!(score(counters(0, 0, 100, 0)).score, 35);
        assert_eq!(score(counters(0, 0, 0, 100)).score, 30);
    }

    #[test]
    fn test_total_cap_at_100() {
        let health = score(counters(u32::MAX, u32::MAX, u32::MAX, u32::MAX));
        assert_eq!(health.score, 100);
    }

    proptest! {
        #[test]
        fn prop_score_in_range(d in 0u32..10_000, a in 0u32..10_000, f in 0u32..10_000, t in 0u32..10_000) {
            let health = score(counters(d, a, f, t));
            prop_assert!((20..=100).contains(&health.score));
        }

        // adding engagement never lowers the score
        #[test]
        fn prop_score_monotone(d in 0u32..100, a in 0u32..100, f in 0u32..100, t in 0u32..100) {
            let base = score(counters(d, a, f, t)).score;
            prop_assert!(score(counters(d + 1, a, f, t)).score >= base);
            prop_assert!(score(counters(d, a + 1, f, t)).score >= base);
            prop_assert!(score(counters(d, a, f + 1, t)).score >= base);
            prop_assert!(score(counters(d, a, f, t + 1)).score >= base);
        }
    }
}
