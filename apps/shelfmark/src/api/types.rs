//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Every response uses the `{ success, data?, error? }` envelope the
//! original frontend consumes, and the analytics payload is reshaped
//! from the core result into the exact chart-ready wire form
//! (`readingStages`, `citationByImpact`, `domainByStage`, `summary`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use shelfmark_core::{
    AnalyticsResult, DateWindow, FilterCriteria, ImpactScore, PaperRecord, ReadingStage,
    ResearchDomain, ShelfmarkError,
};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

/// Envelope for a single paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperResponse {
    pub success: bool,
    pub data: Option<PaperRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaperResponse {
    pub fn success(record: PaperRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Envelope for a list of papers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperListResponse {
    pub success: bool,
    pub data: Vec<PaperRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaperListResponse {
    pub fn success(records: Vec<PaperRecord>) -> Self {
        Self {
            success: true,
            data: records,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: vec![],
            error: Some(msg.into()),
        }
    }
}

/// Envelope for the analytics payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub data: Option<AnalyticsJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyticsResponse {
    pub fn success(analytics: &AnalyticsResult) -> Self {
        Self {
            success: true,
            data: Some(AnalyticsJson::from_result(analytics)),
            error: None,
        }
    }
}

// =============================================================================
// LIST QUERY PARAMETERS
// =============================================================================

/// Query parameters of `GET /api/research/`.
///
/// Multi-valued selections arrive as comma-separated display names, the
/// way the original frontend encodes them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub reading_stage: Option<String>,
    pub research_domain: Option<String>,
    pub impact_score: Option<String>,
    pub date_filter: Option<String>,
}

impl ListParams {
    /// Validate and convert to engine criteria.
    ///
    /// Every name must belong to its closed vocabulary; the first unknown
    /// name is rejected with a field-level error. An absent parameter is
    /// unrestricted, and `date_filter` defaults to "All time".
    pub fn to_criteria(&self) -> Result<FilterCriteria, ShelfmarkError> {
        let mut criteria = FilterCriteria::new();

        for name in split_multi(&self.reading_stage) {
            let stage = ReadingStage::from_name(name).ok_or_else(|| {
                ShelfmarkError::validation(
                    "reading_stage",
                    format!("unknown reading stage '{}'", name),
                )
            })?;
            criteria.stages.insert(stage);
        }
        for name in split_multi(&self.research_domain) {
            let domain = ResearchDomain::from_name(name).ok_or_else(|| {
                ShelfmarkError::validation(
                    "research_domain",
                    format!("unknown research domain '{}'", name),
                )
            })?;
            criteria.domains.insert(domain);
        }
        for name in split_multi(&self.impact_score) {
            let impact = ImpactScore::from_name(name).ok_or_else(|| {
                ShelfmarkError::validation(
                    "impact_score",
                    format!("unknown impact score '{}'", name),
                )
            })?;
            criteria.impacts.insert(impact);
        }
        if let Some(name) = self.date_filter.as_deref() {
            criteria.window = DateWindow::from_name(name).ok_or_else(|| {
                ShelfmarkError::validation("date_filter", format!("unknown date filter '{}'", name))
            })?;
        }

        Ok(criteria)
    }
}

/// Split a comma-separated multi-value parameter into trimmed,
/// non-empty names.
fn split_multi(param: &Option<String>) -> impl Iterator<Item = &str> {
    param
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// =============================================================================
// ANALYTICS WIRE SHAPE
// =============================================================================

/// Chart-ready analytics payload.
///
/// `domainByStage` rows are flattened maps keyed by stage display name,
/// because the stacked bar chart reads each stage as a column of the row
/// object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsJson {
    #[serde(rename = "readingStages")]
    pub reading_stages: Vec<Value>,
    #[serde(rename = "citationByImpact")]
    pub citation_by_impact: Vec<Value>,
    #[serde(rename = "domainByStage")]
    pub domain_by_stage: Vec<Value>,
    pub summary: Value,
}

impl AnalyticsJson {
    /// Reshape the core result into the wire form.
    #[must_use]
    pub fn from_result(analytics: &AnalyticsResult) -> Self {
        let reading_stages = analytics
            .stage_funnel
            .iter()
            .map(|s| json!({ "stage": s.stage.as_str(), "count": s.count }))
            .collect();

        let citation_by_impact = analytics
            .citation_by_impact
            .iter()
            .map(|group| {
                // Both keys feed the scatter tooltip, so each member keeps
                // its title alongside the plotted count.
                let papers: Vec<Value> = group
                    .papers
                    .iter()
                    .map(|p| {
                        json!({
                            "paper_title": p.title,
                            "citation_count": p.citation_count,
                        })
                    })
                    .collect();
                json!({ "impact_score": group.impact.as_str(), "papers": papers })
            })
            .collect();

        let domain_by_stage = analytics
            .domain_by_stage
            .iter()
            .map(|row| {
                let mut flat = Map::new();
                flat.insert("domain".to_string(), json!(row.domain.as_str()));
                for (stage, count) in &row.counts {
                    flat.insert(stage.as_str().to_string(), json!(count));
                }
                Value::Object(flat)
            })
            .collect();

        let avg_citations: Map<String, Value> = analytics
            .summary
            .avg_citations_tenths
            .iter()
            .map(|(domain, tenths)| (domain.as_str().to_string(), json!(tenths_to_f64(*tenths))))
            .collect();

        let summary = json!({
            "totalPapers": analytics.summary.total_papers,
            "fullyReadCount": analytics.summary.fully_read_count,
            "completionRate": analytics.summary.completion_rate,
            "avgCitationsByDomain": avg_citations,
        });

        Self {
            reading_stages,
            citation_by_impact,
            domain_by_stage,
            summary,
        }
    }
}

/// Convert a tenths fixed-point mean to the one-decimal JSON number the
/// frontend renders. The core is integer-only; the lossy step happens
/// here at the wire boundary.
#[allow(clippy::float_arithmetic)]
fn tenths_to_f64(tenths: u64) -> f64 {
    tenths as f64 / 10.0
}

// =============================================================================
// TESTS
// =============================================================================
