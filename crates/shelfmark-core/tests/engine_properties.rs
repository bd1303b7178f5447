//! # Property-Based Tests
//!
//! Verification tests using proptest for the Filter and Aggregation
//! Engines.
//!
//! These tests ensure the engines' algebraic invariants hold for
//! arbitrary well-typed corpora: permissive defaults, idempotence,
//! order preservation, funnel reconciliation, and bounded rates.

use chrono::NaiveDate;
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use proptest::sample::select;
use shelfmark_core::{
    AnalyticsResult, DateWindow, FilterCriteria, FilterEngine, ImpactScore, PaperId, PaperRecord,
    ReadingStage, ResearchDomain,
};

// =============================================================================
// STRATEGIES
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

fn arb_domain() -> impl Strategy<Value = ResearchDomain> {
    select(ResearchDomain::ALL.to_vec())
}

fn arb_stage() -> impl Strategy<Value = ReadingStage> {
    select(ReadingStage::ALL.to_vec())
}

fn arb_impact() -> impl Strategy<Value = ImpactScore> {
    select(ImpactScore::ALL.to_vec())
}

fn arb_window() -> impl Strategy<Value = DateWindow> {
    select(DateWindow::ALL.to_vec())
}

prop_compose! {
    fn arb_record()(
        id in 0u64..100_000,
        domain in arb_domain(),
        stage in arb_stage(),
        impact in arb_impact(),
        citations in 0u64..10_000,
        age_days in 0i64..400,
    ) -> PaperRecord {
        PaperRecord {
            id: PaperId(id),
            title: format!("Paper {}", id),
            first_author: "Author".to_string(),
            domain,
            stage,
            citation_count: citations,
            impact,
            date_added: base_date() - chrono::Duration::days(age_days),
        }
    }
}

fn arb_corpus() -> impl Strategy<Value = Vec<PaperRecord>> {
    vec(arb_record(), 0..40)
}

prop_compose! {
    fn arb_criteria()(
        stages in btree_set(arb_stage(), 0..6),
        domains in btree_set(arb_domain(), 0..6),
        impacts in btree_set(arb_impact(), 0..4),
        window in arb_window(),
    ) -> FilterCriteria {
        FilterCriteria { stages, domains, impacts, window }
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Match-all criteria return the input unchanged, order included.
    #[test]
    fn unrestricted_criteria_are_the_identity(records in arb_corpus()) {
        let out = FilterEngine::apply(&records, &FilterCriteria::new(), base_date());
        prop_assert_eq!(out, records);
    }

    /// Filtering an already-filtered corpus changes nothing.
    #[test]
    fn filter_is_idempotent(records in arb_corpus(), criteria in arb_criteria()) {
        let once = FilterEngine::apply(&records, &criteria, base_date());
        let twice = FilterEngine::apply(&once, &criteria, base_date());
        prop_assert_eq!(once, twice);
    }

    /// The filter emits a subsequence: input order preserved, nothing
    /// duplicated, nothing fabricated.
    #[test]
    fn filter_output_is_a_stable_subsequence(
        records in arb_corpus(),
        criteria in arb_criteria(),
    ) {
        let out = FilterEngine::apply(&records, &criteria, base_date());
        prop_assert!(out.len() <= records.len());

        let mut cursor = records.iter();
        for kept in &out {
            prop_assert!(cursor.any(|r| r == kept));
        }
    }

    /// Identical inputs produce identical output (referential transparency).
    #[test]
    fn filter_is_deterministic(records in arb_corpus(), criteria in arb_criteria()) {
        let a = FilterEngine::apply(&records, &criteria, base_date());
        let b = FilterEngine::apply(&records, &criteria, base_date());
        prop_assert_eq!(a, b);
    }

    /// Funnel counts reconcile with the number of records carrying a
    /// canonical stage (here: all of them).
    #[test]
    fn funnel_counts_reconcile_with_corpus(records in arb_corpus()) {
        let result = AnalyticsResult::compute(&records);
        let funnel_sum: usize = result.stage_funnel.iter().map(|s| s.count).sum();
        let canonical = records.iter().filter(|r| r.stage.is_canonical()).count();
        prop_assert_eq!(funnel_sum, canonical);
        prop_assert_eq!(result.stage_funnel.len(), 6);
    }

    /// Completion rate stays within 0..=100 for any corpus.
    #[test]
    fn completion_rate_is_bounded(records in arb_corpus()) {
        let summary = AnalyticsResult::compute(&records).summary;
        prop_assert!(summary.completion_rate <= 100);
        prop_assert_eq!(summary.total_papers, records.len());
    }

    /// Every cross-tabulation row carries exactly the six canonical
    /// stage keys, whatever stages are actually present.
    #[test]
    fn cross_tab_rows_are_complete(records in arb_corpus()) {
        let result = AnalyticsResult::compute(&records);
        for row in &result.domain_by_stage {
            prop_assert_eq!(row.counts.len(), 6);
            for stage in ReadingStage::ALL {
                prop_assert!(row.counts.contains_key(&stage));
            }
        }
    }

    /// Citation groups are only emitted for non-empty categories, and
    /// group membership reconciles with the corpus.
    #[test]
    fn citation_groups_are_nonempty_and_reconcile(records in arb_corpus()) {
        let result = AnalyticsResult::compute(&records);
        let grouped: usize = result.citation_by_impact.iter().map(|g| g.papers.len()).sum();
        prop_assert_eq!(grouped, records.len());
        for group in &result.citation_by_impact {
            prop_assert!(!group.papers.is_empty());
        }
    }

    /// Per-domain means only exist for domains with members, and every
    /// mean lies between the domain's min and max citation count
    /// (scaled to tenths).
    #[test]
    fn domain_means_are_bounded_by_members(records in arb_corpus()) {
        let summary = AnalyticsResult::compute(&records).summary;
        for (domain, tenths) in &summary.avg_citations_tenths {
            let members: Vec<u64> = records
                .iter()
                .filter(|r| r.domain == *domain)
                .map(|r| r.citation_count)
                .collect();
            prop_assert!(!members.is_empty());
            let min = members.iter().min().copied().unwrap_or(0);
            let max = members.iter().max().copied().unwrap_or(0);
            prop_assert!(*tenths >= min * 10);
            prop_assert!(*tenths <= max * 10);
        }
    }
}
