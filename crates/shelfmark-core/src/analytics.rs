//! # Aggregation Engine
//!
//! Pure derivations over a record snapshot: stage funnel, citation-by-impact
//! groups, domain-by-stage cross tabulation, and scalar summary metrics.
//!
//! - Every derivation is a pure function; no state, no I/O
//! - Integer arithmetic only: rates are whole percents, means are tenths
//!   (cf. the same fixed-point convention used for ratios elsewhere in
//!   the workspace)
//! - Never fails on well-typed input; empty or skewed corpora yield
//!   degenerate-but-valid results
//!
//! ## Malformed-data policy
//!
//! Records carrying `Unrecognized` enum values are excluded from every
//! category-keyed view (funnel, citation groups, cross-tab rows, per-domain
//! means) but still counted in `total_papers`, so the summary total always
//! reconciles with the corpus size even when breakdowns do not sum to it.

use crate::types::{ImpactScore, PaperRecord, ReadingStage, ResearchDomain};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// DERIVED VIEW TYPES
// =============================================================================

/// One funnel entry: a canonical stage and its exact-match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    /// The pipeline stage.
    pub stage: ReadingStage,
    /// Number of records currently at exactly this stage.
    pub count: usize,
}

/// One member of an impact category: the paper's title and its citation
/// count. The title rides along so the point-cloud tooltip can label
/// each point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactPaper {
    /// The paper title.
    pub title: String,
    /// The paper's citation count.
    pub citation_count: u64,
}

/// The members of one impact category.
///
/// Only categories with at least one member are emitted; the consumer
/// renders per-category point clouds, so empty categories are omitted
/// rather than zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactGroup {
    /// The impact category.
    pub impact: ImpactScore,
    /// Members, in input order.
    pub papers: Vec<ImpactPaper>,
}

/// One cross-tabulation row: a domain with a count for every canonical
/// stage, zero-filled. A stacked visualization requires identical keys
/// across rows, so completeness here is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRow {
    /// The research domain this row describes.
    pub domain: ResearchDomain,
    /// Exactly the six canonical stages, each mapped to a count.
    pub counts: BTreeMap<ReadingStage, usize>,
}

/// Scalar and per-domain summary metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    /// Total records in the snapshot, malformed ones included.
    pub total_papers: usize,
    /// Records at exactly the "Fully Read" stage.
    pub fully_read_count: usize,
    /// `round(fully_read / total * 100)`, 0 for an empty corpus.
    pub completion_rate: u8,
    /// Per-domain mean citation count in tenths (mean * 10, rounded
    /// half-up). Domains with zero members are omitted.
    pub avg_citations_tenths: BTreeMap<ResearchDomain, u64>,
}

/// The four derived views, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsResult {
    /// All six canonical stages in pipeline order, zero-filled.
    pub stage_funnel: Vec<StageCount>,
    /// Impact categories actually present, in canonical order.
    pub citation_by_impact: Vec<ImpactGroup>,
    /// One complete row per domain actually present, in canonical order.
    pub domain_by_stage: Vec<DomainRow>,
    /// Scalar and derived metrics.
    pub summary: CorpusSummary,
}

impl AnalyticsResult {
    /// Derive all four views from one snapshot.
    #[must_use]
    pub fn compute(records: &[PaperRecord]) -> Self {
        Self {
            stage_funnel: compute_funnel(records),
            citation_by_impact: compute_citation_by_impact(records),
            domain_by_stage: compute_domain_by_stage(records),
            summary: compute_summary(records),
        }
    }
}

// =============================================================================
// FUNNEL
// =============================================================================

/// Count records per stage, exact match (not cumulative downstream
/// counting). The output always enumerates all six canonical stages in
/// pipeline order so a funnel visualization never has missing categories.
#[must_use]
pub fn compute_funnel(records: &[PaperRecord]) -> Vec<StageCount> {
    ReadingStage::ALL
        .into_iter()
        .map(|stage| StageCount {
            stage,
            count: records.iter().filter(|r| r.stage == stage).count(),
        })
        .collect()
}

// =============================================================================
// CITATION BY IMPACT
// =============================================================================

/// Partition records by impact category. Only canonical categories with
/// at least one member are emitted; member order matches input order.
#[must_use]
pub fn compute_citation_by_impact(records: &[PaperRecord]) -> Vec<ImpactGroup> {
    ImpactScore::ALL
        .into_iter()
        .filter_map(|impact| {
            let papers: Vec<ImpactPaper> = records
                .iter()
                .filter(|r| r.impact == impact)
                .map(|r| ImpactPaper {
                    title: r.title.clone(),
                    citation_count: r.citation_count,
                })
                .collect();
            if papers.is_empty() {
                None
            } else {
                Some(ImpactGroup { impact, papers })
            }
        })
        .collect()
}

// =============================================================================
// DOMAIN BY STAGE CROSS TABULATION
// =============================================================================

/// Build one row per canonical domain present in the input, each row
/// carrying a zero-filled count for every canonical stage.
#[must_use]
pub fn compute_domain_by_stage(records: &[PaperRecord]) -> Vec<DomainRow> {
    ResearchDomain::ALL
        .into_iter()
        .filter(|domain| records.iter().any(|r| r.domain == *domain))
        .map(|domain| {
            // Densify: sparse group-by result, then zero-fill every stage.
            let mut counts: BTreeMap<ReadingStage, usize> =
                ReadingStage::ALL.into_iter().map(|s| (s, 0)).collect();
            for record in records.iter().filter(|r| r.domain == domain) {
                if let Some(slot) = counts.get_mut(&record.stage) {
                    *slot += 1;
                }
            }
            DomainRow { domain, counts }
        })
        .collect()
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Round-half-up integer percentage, 0 when the denominator is 0.
/// Widened to u128 so the scaled numerator cannot overflow.
fn percent_rounded(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u128, whole as u128);
    ((200 * part + whole) / (2 * whole)) as u8
}

/// Round-half-up mean in tenths: `round(10 * sum / count)`.
///
/// Computed in u128 so the scaled sum cannot overflow; a mean whose
/// tenths exceed `u64::MAX` saturates.
fn mean_tenths(sum: u128, count: u128) -> u64 {
    // Caller guarantees count >= 1.
    let tenths = (20 * sum + count) / (2 * count);
    u64::try_from(tenths).unwrap_or(u64::MAX)
}

/// Compute scalar metrics and per-domain citation means.
#[must_use]
pub fn compute_summary(records: &[PaperRecord]) -> CorpusSummary {
    let total_papers = records.len();
    let fully_read_count = records.iter().filter(|r| r.stage.is_fully_read()).count();

    let mut avg_citations_tenths = BTreeMap::new();
    for domain in ResearchDomain::ALL {
        let members: Vec<u64> = records
            .iter()
            .filter(|r| r.domain == domain)
            .map(|r| r.citation_count)
            .collect();
        if members.is_empty() {
            continue;
        }
        let sum: u128 = members.iter().map(|&c| u128::from(c)).sum();
        avg_citations_tenths.insert(domain, mean_tenths(sum, members.len() as u128));
    }

    CorpusSummary {
        total_papers,
        fully_read_count,
        completion_rate: percent_rounded(fully_read_count, total_papers),
        avg_citations_tenths,
    }
}

// =============================================================================
// TESTS
// =============================================================================
