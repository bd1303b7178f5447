//! # Filter Engine
//!
//! Pure predicate evaluator reducing a record collection to the subset
//! matching a [`FilterCriteria`] value.
//!
//! - OR within a field, AND across fields
//! - Empty selection sets are the permissive default, not "match nothing"
//! - Stable: output preserves input order, no duplication, no fabrication
//! - Referentially transparent: identical inputs (including `now`)
//!   produce identical output

use crate::query::FilterCriteria;
use crate::types::PaperRecord;
use chrono::NaiveDate;

/// The FilterEngine evaluates criteria against record snapshots.
///
/// Stateless and reentrant; safe to invoke concurrently.
pub struct FilterEngine;

impl FilterEngine {
    /// Whether a single record satisfies the criteria at `now`.
    ///
    /// `Unrecognized` enum values never satisfy a non-empty selection
    /// (they are outside every closed selection set) and always satisfy
    /// an empty one.
    #[must_use]
    pub fn matches(record: &PaperRecord, criteria: &FilterCriteria, now: NaiveDate) -> bool {
        if !criteria.stages.is_empty() && !criteria.stages.contains(&record.stage) {
            return false;
        }
        if !criteria.domains.is_empty() && !criteria.domains.contains(&record.domain) {
            return false;
        }
        if !criteria.impacts.is_empty() && !criteria.impacts.contains(&record.impact) {
            return false;
        }
        criteria.window.contains(record.date_added, now)
    }

    /// Stable filter over a record snapshot.
    ///
    /// Returns owned copies of the matching records in input order.
    #[must_use]
    pub fn apply(
        records: &[PaperRecord],
        criteria: &FilterCriteria,
        now: NaiveDate,
    ) -> Vec<PaperRecord> {
        records
            .iter()
            .filter(|r| Self::matches(r, criteria, now))
            .cloned()
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DateWindow;
    use crate::types::{ImpactScore, PaperId, ReadingStage, ResearchDomain};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn paper(
        id: u64,
        domain: ResearchDomain,
        stage: ReadingStage,
        impact: ImpactScore,
        added: NaiveDate,
    ) -> PaperRecord {
        PaperRecord {
            id: PaperId(id),
            title: format!("Paper {}", id),
            first_author: "Curie".to_string(),
            domain,
            stage,
            citation_count: id * 10,
            impact,
            date_added: added,
        }
    }

    fn corpus(now: NaiveDate) -> Vec<PaperRecord> {
        vec![
            paper(
                1,
                ResearchDomain::ComputerScience,
                ReadingStage::AbstractRead,
                ImpactScore::High,
                now,
            ),
            paper(
                2,
                ResearchDomain::Physics,
                ReadingStage::FullyRead,
                ImpactScore::Low,
                now - chrono::Duration::days(10),
            ),
            paper(
                3,
                ResearchDomain::ComputerScience,
                ReadingStage::NotesCompleted,
                ImpactScore::Unknown,
                now - chrono::Duration::days(100),
            ),
        ]
    }

    #[test]
    fn empty_criteria_match_everything_in_order() {
        let now = date(2024, 6, 15);
        let records = corpus(now);
        let out = FilterEngine::apply(&records, &FilterCriteria::new(), now);
        assert_eq!(out, records);
    }

    #[test]
    fn filtering_is_idempotent() {
        let now = date(2024, 6, 15);
        let records = corpus(now);
        let criteria = FilterCriteria::new().with_domain(ResearchDomain::ComputerScience);

        let once = FilterEngine::apply(&records, &criteria, now);
        let twice = FilterEngine::apply(&once, &criteria, now);
        assert_eq!(once, twice);
    }

    #[test]
    fn or_within_a_field() {
        let now = date(2024, 6, 15);
        let records = corpus(now);
        let criteria = FilterCriteria::new()
            .with_stage(ReadingStage::AbstractRead)
            .with_stage(ReadingStage::FullyRead);

        let out = FilterEngine::apply(&records, &criteria, now);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, PaperId(1));
        assert_eq!(out[1].id, PaperId(2));
    }

    #[test]
    fn and_across_fields() {
        let now = date(2024, 6, 15);
        let records = corpus(now);
        // Computer Science AND Fully Read: nothing matches both.
        let criteria = FilterCriteria::new()
            .with_domain(ResearchDomain::ComputerScience)
            .with_stage(ReadingStage::FullyRead);

        assert!(FilterEngine::apply(&records, &criteria, now).is_empty());
    }

    #[test]
    fn date_window_applies_with_other_fields() {
        let now = date(2024, 6, 15);
        let records = corpus(now);
        let criteria = FilterCriteria::new()
            .with_domain(ResearchDomain::ComputerScience)
            .with_window(DateWindow::ThisWeek);

        let out = FilterEngine::apply(&records, &criteria, now);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, PaperId(1));
    }

    #[test]
    fn absent_domain_yields_empty_result() {
        let now = date(2024, 6, 15);
        let records = corpus(now);
        let criteria = FilterCriteria::new().with_domain(ResearchDomain::Biology);
        assert!(FilterEngine::apply(&records, &criteria, now).is_empty());
    }

    #[test]
    fn unrecognized_passes_empty_selection_but_never_a_closed_one() {
        let now = date(2024, 6, 15);
        let stray = paper(
            9,
            ResearchDomain::Unrecognized,
            ReadingStage::Unrecognized,
            ImpactScore::Unrecognized,
            now,
        );
        assert!(FilterEngine::matches(&stray, &FilterCriteria::new(), now));

        let every_domain = ResearchDomain::ALL
            .into_iter()
            .fold(FilterCriteria::new(), FilterCriteria::with_domain);
        assert!(!FilterEngine::matches(&stray, &every_domain, now));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let now = date(2024, 6, 15);
        assert!(FilterEngine::apply(&[], &FilterCriteria::new(), now).is_empty());
    }
}
