//! # Record Store
//!
//! The store contract the engines consume, plus the in-memory reference
//! implementation.
//!
//! - The engines never call the mutators; they only read a snapshot
//! - Drafts and patches are validated field-by-field at this boundary,
//!   so `Unrecognized` enum values can only enter via a corrupted
//!   external snapshot, never via `create`/`update`
//! - `BTreeMap` keeps iteration (and therefore `all()`) deterministic,
//!   ordered by id, which is insertion order

use crate::types::{
    ImpactScore, PaperId, PaperRecord, ReadingStage, ResearchDomain, ShelfmarkError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for paper titles.
///
/// Titles longer than this are rejected at the store boundary to prevent
/// memory exhaustion from malformed input.
pub const MAX_TITLE_LENGTH: usize = 512;

/// Maximum length for author names.
pub const MAX_AUTHOR_LENGTH: usize = 256;

// =============================================================================
// DRAFT & PATCH
// =============================================================================

/// A new paper before the store assigns its id.
///
/// Wire field names match the original REST API's POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDraft {
    #[serde(rename = "paper_title")]
    pub title: String,
    #[serde(rename = "first_author_name")]
    pub first_author: String,
    #[serde(rename = "research_domain")]
    pub domain: ResearchDomain,
    #[serde(rename = "reading_stage")]
    pub stage: ReadingStage,
    pub citation_count: u64,
    #[serde(rename = "impact_score")]
    pub impact: ImpactScore,
    pub date_added: NaiveDate,
}

impl PaperDraft {
    /// Validate the draft field-by-field.
    ///
    /// Returns the first violation as a field-level error.
    pub fn validate(&self) -> Result<(), ShelfmarkError> {
        validate_title(&self.title)?;
        validate_author(&self.first_author)?;
        if !self.domain.is_canonical() {
            return Err(ShelfmarkError::validation(
                "research_domain",
                "not a recognized research domain",
            ));
        }
        if !self.stage.is_canonical() {
            return Err(ShelfmarkError::validation(
                "reading_stage",
                "not a recognized reading stage",
            ));
        }
        if !self.impact.is_canonical() {
            return Err(ShelfmarkError::validation(
                "impact_score",
                "not a recognized impact score",
            ));
        }
        Ok(())
    }
}

/// Partial update for an existing record. Absent fields are left as-is.
///
/// This is the original REST API's PUT body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaperPatch {
    #[serde(rename = "paper_title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "first_author_name", skip_serializing_if = "Option::is_none")]
    pub first_author: Option<String>,
    #[serde(rename = "research_domain", skip_serializing_if = "Option::is_none")]
    pub domain: Option<ResearchDomain>,
    #[serde(rename = "reading_stage", skip_serializing_if = "Option::is_none")]
    pub stage: Option<ReadingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u64>,
    #[serde(rename = "impact_score", skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<NaiveDate>,
}

impl PaperPatch {
    /// Validate the fields that are present.
    pub fn validate(&self) -> Result<(), ShelfmarkError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(author) = &self.first_author {
            validate_author(author)?;
        }
        if self.domain.is_some_and(|d| !d.is_canonical()) {
            return Err(ShelfmarkError::validation(
                "research_domain",
                "not a recognized research domain",
            ));
        }
        if self.stage.is_some_and(|s| !s.is_canonical()) {
            return Err(ShelfmarkError::validation(
                "reading_stage",
                "not a recognized reading stage",
            ));
        }
        if self.impact.is_some_and(|i| !i.is_canonical()) {
            return Err(ShelfmarkError::validation(
                "impact_score",
                "not a recognized impact score",
            ));
        }
        Ok(())
    }

    /// Apply the present fields to a record.
    fn apply(self, record: &mut PaperRecord) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(author) = self.first_author {
            record.first_author = author;
        }
        if let Some(domain) = self.domain {
            record.domain = domain;
        }
        if let Some(stage) = self.stage {
            record.stage = stage;
        }
        if let Some(citations) = self.citation_count {
            record.citation_count = citations;
        }
        if let Some(impact) = self.impact {
            record.impact = impact;
        }
        if let Some(date) = self.date_added {
            record.date_added = date;
        }
    }
}

fn validate_title(title: &str) -> Result<(), ShelfmarkError> {
    if title.trim().is_empty() {
        return Err(ShelfmarkError::validation(
            "paper_title",
            "must not be empty",
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(ShelfmarkError::validation(
            "paper_title",
            format!("exceeds maximum length of {} bytes", MAX_TITLE_LENGTH),
        ));
    }
    Ok(())
}

fn validate_author(author: &str) -> Result<(), ShelfmarkError> {
    if author.trim().is_empty() {
        return Err(ShelfmarkError::validation(
            "first_author_name",
            "must not be empty",
        ));
    }
    if author.len() > MAX_AUTHOR_LENGTH {
        return Err(ShelfmarkError::validation(
            "first_author_name",
            format!("exceeds maximum length of {} bytes", MAX_AUTHOR_LENGTH),
        ));
    }
    Ok(())
}

// =============================================================================
// STORE CONTRACT
// =============================================================================

/// Durable holder of paper records.
///
/// The Query Facade reads `all()` exactly once per call and treats the
/// returned snapshot as immutable; the mutators exist for the application
/// layer and must reflect into subsequent `all()` calls.
pub trait RecordStore {
    /// Snapshot of every record, ordered by id.
    fn all(&self) -> Vec<PaperRecord>;

    /// Fetch a single record.
    fn get(&self, id: PaperId) -> Option<PaperRecord>;

    /// Validate a draft and insert it under a fresh id.
    fn create(&mut self, draft: PaperDraft) -> Result<PaperRecord, ShelfmarkError>;

    /// Validate a patch and apply it to an existing record.
    fn update(&mut self, id: PaperId, patch: PaperPatch) -> Result<PaperRecord, ShelfmarkError>;

    /// Remove a record, returning it.
    fn delete(&mut self, id: PaperId) -> Result<PaperRecord, ShelfmarkError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory record store backed by a `BTreeMap`.
///
/// Ids increase monotonically and are never reused, so a deleted id stays
/// a `NotFound` forever.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    papers: BTreeMap<PaperId, PaperRecord>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a deserialized snapshot (e.g. the JSON data
    /// file). Records keep their ids; the id counter resumes past the
    /// highest seen.
    #[must_use]
    pub fn from_records(records: Vec<PaperRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id.0 + 1).max().unwrap_or(0);
        Self {
            papers: records.into_iter().map(|r| (r.id, r)).collect(),
            next_id,
        }
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn all(&self) -> Vec<PaperRecord> {
        self.papers.values().cloned().collect()
    }

    fn get(&self, id: PaperId) -> Option<PaperRecord> {
        self.papers.get(&id).cloned()
    }

    fn create(&mut self, draft: PaperDraft) -> Result<PaperRecord, ShelfmarkError> {
        draft.validate()?;

        let id = PaperId(self.next_id);
        self.next_id += 1;

        let record = PaperRecord {
            id,
            title: draft.title,
            first_author: draft.first_author,
            domain: draft.domain,
            stage: draft.stage,
            citation_count: draft.citation_count,
            impact: draft.impact,
            date_added: draft.date_added,
        };
        self.papers.insert(id, record.clone());
        Ok(record)
    }

    fn update(&mut self, id: PaperId, patch: PaperPatch) -> Result<PaperRecord, ShelfmarkError> {
        patch.validate()?;
        let record = self
            .papers
            .get_mut(&id)
            .ok_or(ShelfmarkError::NotFound(id))?;
        patch.apply(record);
        Ok(record.clone())
    }

    fn delete(&mut self, id: PaperId) -> Result<PaperRecord, ShelfmarkError> {
        self.papers.remove(&id).ok_or(ShelfmarkError::NotFound(id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
