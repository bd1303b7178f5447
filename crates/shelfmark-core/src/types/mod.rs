//! # Core Type Definitions
//!
//! This module contains all core types for the Shelfmark corpus engine:
//! - Record identifier (`PaperId`)
//! - Closed enum vocabularies (`ResearchDomain`, `ReadingStage`, `ImpactScore`)
//! - The tracked record itself (`PaperRecord`)
//! - Error types (`ShelfmarkError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Serialize to the exact display strings used on the wire
//!
//! ## The `Unrecognized` variants
//!
//! Each vocabulary carries a hidden `Unrecognized` variant that serde falls
//! back to when a stored snapshot contains a value outside the closed set.
//! It is excluded from every `ALL` table, never accepted at the validated
//! boundary, and never matches a non-empty filter selection. Aggregations
//! exclude it from category-keyed views while still counting the record in
//! corpus totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIER
// =============================================================================

/// Unique identifier for a paper record, assigned by the record store.
/// Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PaperId(pub u64);

impl std::fmt::Display for PaperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// RESEARCH DOMAIN
// =============================================================================

/// Closed vocabulary of research domains.
///
/// Deserialization goes through the display string and falls back to
/// `Unrecognized` instead of failing, so a corrupted snapshot cannot
/// crash the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ResearchDomain {
    ComputerScience,
    Biology,
    Physics,
    Chemistry,
    Mathematics,
    SocialSciences,
    /// Fallback for values outside the closed set. Not part of `ALL`.
    Unrecognized,
}

impl From<String> for ResearchDomain {
    fn from(s: String) -> Self {
        Self::from_name(&s).unwrap_or(ResearchDomain::Unrecognized)
    }
}

impl Serialize for ResearchDomain {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl ResearchDomain {
    /// The canonical vocabulary, in display order.
    pub const ALL: [ResearchDomain; 6] = [
        ResearchDomain::ComputerScience,
        ResearchDomain::Biology,
        ResearchDomain::Physics,
        ResearchDomain::Chemistry,
        ResearchDomain::Mathematics,
        ResearchDomain::SocialSciences,
    ];

    /// Get the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchDomain::ComputerScience => "Computer Science",
            ResearchDomain::Biology => "Biology",
            ResearchDomain::Physics => "Physics",
            ResearchDomain::Chemistry => "Chemistry",
            ResearchDomain::Mathematics => "Mathematics",
            ResearchDomain::SocialSciences => "Social Sciences",
            ResearchDomain::Unrecognized => "Unrecognized",
        }
    }

    /// Parse a display name. Returns `None` for anything outside the
    /// canonical vocabulary (`Unrecognized` is not parseable on purpose).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == name)
    }

    /// Whether this value belongs to the closed vocabulary.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        !matches!(self, ResearchDomain::Unrecognized)
    }
}

impl std::fmt::Display for ResearchDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// READING STAGE
// =============================================================================

/// Closed, ordered vocabulary of reading pipeline stages.
///
/// Declaration order IS pipeline order; the derived `Ord` is the canonical
/// ordering contract relied on by the funnel and cross-tabulation views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ReadingStage {
    AbstractRead,
    IntroductionDone,
    MethodologyDone,
    ResultsAnalyzed,
    FullyRead,
    NotesCompleted,
    /// Fallback for values outside the closed set. Not part of `ALL`.
    Unrecognized,
}

impl From<String> for ReadingStage {
    fn from(s: String) -> Self {
        Self::from_name(&s).unwrap_or(ReadingStage::Unrecognized)
    }
}

impl Serialize for ReadingStage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl ReadingStage {
    /// The canonical pipeline, in order.
    pub const ALL: [ReadingStage; 6] = [
        ReadingStage::AbstractRead,
        ReadingStage::IntroductionDone,
        ReadingStage::MethodologyDone,
        ReadingStage::ResultsAnalyzed,
        ReadingStage::FullyRead,
        ReadingStage::NotesCompleted,
    ];

    /// Get the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStage::AbstractRead => "Abstract Read",
            ReadingStage::IntroductionDone => "Introduction Done",
            ReadingStage::MethodologyDone => "Methodology Done",
            ReadingStage::ResultsAnalyzed => "Results Analyzed",
            ReadingStage::FullyRead => "Fully Read",
            ReadingStage::NotesCompleted => "Notes Completed",
            ReadingStage::Unrecognized => "Unrecognized",
        }
    }

    /// Parse a display name. Returns `None` outside the canonical pipeline.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }

    /// Whether this value belongs to the closed vocabulary.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        !matches!(self, ReadingStage::Unrecognized)
    }

    /// The next stage in the pipeline, if any.
    #[must_use]
    pub fn next(&self) -> Option<ReadingStage> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Whether this is the "Fully Read" milestone used by the
    /// completion-rate metric. `NotesCompleted` sits after `FullyRead` in
    /// the pipeline but the metric is an exact stage match.
    #[must_use]
    pub fn is_fully_read(&self) -> bool {
        matches!(self, ReadingStage::FullyRead)
    }
}

impl std::fmt::Display for ReadingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// IMPACT SCORE
// =============================================================================

/// Closed vocabulary of qualitative impact ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ImpactScore {
    High,
    Medium,
    Low,
    Unknown,
    /// Fallback for values outside the closed set. Not part of `ALL`.
    Unrecognized,
}

impl From<String> for ImpactScore {
    fn from(s: String) -> Self {
        Self::from_name(&s).unwrap_or(ImpactScore::Unrecognized)
    }
}

impl Serialize for ImpactScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl ImpactScore {
    /// The canonical vocabulary, in display order.
    pub const ALL: [ImpactScore; 4] = [
        ImpactScore::High,
        ImpactScore::Medium,
        ImpactScore::Low,
        ImpactScore::Unknown,
    ];

    /// Get the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactScore::High => "High Impact",
            ImpactScore::Medium => "Medium Impact",
            ImpactScore::Low => "Low Impact",
            ImpactScore::Unknown => "Unknown",
            ImpactScore::Unrecognized => "Unrecognized",
        }
    }

    /// Parse a display name. Returns `None` outside the canonical vocabulary.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.as_str() == name)
    }

    /// Whether this value belongs to the closed vocabulary.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        !matches!(self, ImpactScore::Unrecognized)
    }
}

impl std::fmt::Display for ImpactScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PAPER RECORD
// =============================================================================

/// One tracked paper.
///
/// Field names on the wire match the original REST API (`paper_title`,
/// `first_author_name`, ...). The record is an immutable snapshot as far
/// as the engines are concerned; only the record store mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Store-assigned identifier.
    pub id: PaperId,
    /// Non-empty paper title.
    #[serde(rename = "paper_title")]
    pub title: String,
    /// Non-empty first author name.
    #[serde(rename = "first_author_name")]
    pub first_author: String,
    #[serde(rename = "research_domain")]
    pub domain: ResearchDomain,
    #[serde(rename = "reading_stage")]
    pub stage: ReadingStage,
    /// Citation count; the unsigned type makes the ">= 0" invariant structural.
    pub citation_count: u64,
    #[serde(rename = "impact_score")]
    pub impact: ImpactScore,
    /// Calendar date the paper was logged (no time-of-day semantics).
    pub date_added: NaiveDate,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Shelfmark system.
///
/// - No silent failures
/// - Use `Result<T, ShelfmarkError>` for fallible operations
/// - The engines never fail on well-typed input; these errors belong to
///   the record store boundary and the application layer
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    /// A field supplied to the store or filter boundary is malformed.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The offending field, in wire naming.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// A mutation targeted a nonexistent record id.
    #[error("Paper not found: {0}")]
    NotFound(PaperId),

    /// An I/O error occurred (application layer only).
    #[error("I/O error: {0}")]
    Io(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShelfmarkError {
    /// Shorthand for a field-level validation error.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ShelfmarkError::Validation {
            field,
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
