//! # shelfmark-core
//!
//! The deterministic Paper Corpus Query & Analytics Engine - THE LOGIC.
//!
//! This crate implements the corpus core: closed enum vocabularies, a pure
//! Filter Engine, a pure Aggregation Engine, the record store contract,
//! and the Query Facade that composes them over a single consistent
//! snapshot.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Holds no mutable state across calls; both engines are pure transforms
//! - Never mutates records; persistence belongs to the record store
//! - Uses integer arithmetic only (rates as whole percents, means as tenths)
//! - Threads the evaluation instant (`now`) explicitly, so date-window
//!   behavior is deterministic and reproducible in tests
//! - Has NO async, NO network, NO I/O dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod analytics;
pub mod corpus;
pub mod filter;
pub mod query;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ImpactScore, PaperId, PaperRecord, ReadingStage, ResearchDomain, ShelfmarkError,
};

// =============================================================================
// RE-EXPORTS: Engines & Facade
// =============================================================================

pub use analytics::{
    AnalyticsResult, CorpusSummary, DomainRow, ImpactGroup, ImpactPaper, StageCount,
    compute_citation_by_impact, compute_domain_by_stage, compute_funnel, compute_summary,
};
pub use corpus::Corpus;
pub use filter::FilterEngine;
pub use query::{DateWindow, FilterCriteria};

// =============================================================================
// RE-EXPORTS: Record Store
// =============================================================================

pub use store::{MemoryStore, PaperDraft, PaperPatch, RecordStore};
