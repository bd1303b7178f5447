//! # Query Facade
//!
//! Thin composition point over one consistent store snapshot.
//!
//! The snapshot is buffered once per facade construction, so every view
//! derived from the same `Corpus` observes the same point-in-time record
//! set — a concurrent store write cannot produce a torn view where the
//! funnel and the summary disagree about the corpus.

use crate::analytics::AnalyticsResult;
use crate::filter::FilterEngine;
use crate::query::FilterCriteria;
use crate::store::RecordStore;
use crate::types::{PaperRecord, ReadingStage};
use chrono::NaiveDate;

/// One consistent point-in-time view of the record store.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<PaperRecord>,
}

impl Corpus {
    /// Buffer a single consistent snapshot from the store.
    #[must_use]
    pub fn snapshot<S: RecordStore + ?Sized>(store: &S) -> Self {
        Self {
            records: store.all(),
        }
    }

    /// Build a corpus directly from records (tests, CLI pipelines).
    #[must_use]
    pub fn from_records(records: Vec<PaperRecord>) -> Self {
        Self { records }
    }

    /// The underlying snapshot, in store order.
    #[must_use]
    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// List papers matching the criteria, evaluated at `now`.
    #[must_use]
    pub fn list(&self, criteria: &FilterCriteria, now: NaiveDate) -> Vec<PaperRecord> {
        FilterEngine::apply(&self.records, criteria, now)
    }

    /// Derive the four analytical views over the full snapshot.
    ///
    /// Analytics are always computed over the whole corpus, regardless of
    /// any list-view filter state.
    #[must_use]
    pub fn analytics(&self) -> AnalyticsResult {
        AnalyticsResult::compute(&self.records)
    }

    /// Papers currently at exactly one stage, in store order.
    #[must_use]
    pub fn papers_in_stage(&self, stage: ReadingStage) -> Vec<PaperRecord> {
        self.records
            .iter()
            .filter(|r| r.stage == stage)
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
    use crate::store::{MemoryStore, PaperDraft};
    use crate::types::{ImpactScore, ResearchDomain};

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        let stages = [
            ReadingStage::AbstractRead,
            ReadingStage::FullyRead,
            ReadingStage::FullyRead,
        ];
        for (i, stage) in stages.into_iter().enumerate() {
            store
                .create(PaperDraft {
                    title: format!("Paper {i}"),
                    first_author: "Hopper".to_string(),
                    domain: ResearchDomain::ComputerScience,
                    stage,
                    citation_count: 10 * (i as u64 + 1),
                    impact: ImpactScore::High,
                    date_added: NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"),
                })
                .expect("create");
        }
        store
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutations() {
        let mut store = seeded_store();
        let corpus = Corpus::snapshot(&store);

        store
            .delete(corpus.records()[0].id)
            .expect("delete after snapshot");

        // The buffered view is unaffected; both derived views agree.
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.analytics().summary.total_papers, 3);
    }

    #[test]
    fn list_and_analytics_share_the_snapshot() {
        let store = seeded_store();
        let corpus = Corpus::snapshot(&store);
        let now = NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date");

        let listed = corpus.list(&FilterCriteria::new(), now);
        assert_eq!(listed.len(), corpus.analytics().summary.total_papers);
    }

    #[test]
    fn papers_in_stage_is_an_exact_match() {
        let store = seeded_store();
        let corpus = Corpus::snapshot(&store);

        assert_eq!(corpus.papers_in_stage(ReadingStage::FullyRead).len(), 2);
        assert_eq!(corpus.papers_in_stage(ReadingStage::AbstractRead).len(), 1);
        assert!(
            corpus
                .papers_in_stage(ReadingStage::NotesCompleted)
                .is_empty()
        );
    }

    #[test]
    fn empty_store_yields_degenerate_views() {
        let corpus = Corpus::snapshot(&MemoryStore::new());
        assert!(corpus.is_empty());

        let analytics = corpus.analytics();
        assert_eq!(analytics.summary.total_papers, 0);
        assert_eq!(analytics.summary.completion_rate, 0);
        assert!(analytics.citation_by_impact.is_empty());
        assert!(analytics.domain_by_stage.is_empty());
        assert_eq!(analytics.stage_funnel.len(), 6);
    }
}
