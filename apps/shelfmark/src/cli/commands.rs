//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AnalyticsJson, AppState};
use crate::persistence::{load_store, save_store};
use chrono::{Local, NaiveDate};
use shelfmark_core::{
    Corpus, DateWindow, FilterCriteria, ImpactScore, PaperDraft, PaperId, PaperPatch, PaperRecord,
    ReadingStage, RecordStore, ResearchDomain, ShelfmarkError,
};
use std::path::Path;

// =============================================================================
// NAME PARSING HELPERS
// =============================================================================

fn parse_stage(name: &str) -> Result<ReadingStage, ShelfmarkError> {
    ReadingStage::from_name(name).ok_or_else(|| {
        ShelfmarkError::validation("reading_stage", format!("unknown reading stage '{}'", name))
    })
}

fn parse_domain(name: &str) -> Result<ResearchDomain, ShelfmarkError> {
    ResearchDomain::from_name(name).ok_or_else(|| {
        ShelfmarkError::validation(
            "research_domain",
            format!("unknown research domain '{}'", name),
        )
    })
}

fn parse_impact(name: &str) -> Result<ImpactScore, ShelfmarkError> {
    ImpactScore::from_name(name).ok_or_else(|| {
        ShelfmarkError::validation("impact_score", format!("unknown impact score '{}'", name))
    })
}

fn parse_window(name: &str) -> Result<DateWindow, ShelfmarkError> {
    DateWindow::from_name(name).ok_or_else(|| {
        ShelfmarkError::validation("date_filter", format!("unknown date filter '{}'", name))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, ShelfmarkError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ShelfmarkError::validation("date_added", format!("expected YYYY-MM-DD, got '{}'", raw))
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), ShelfmarkError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ShelfmarkError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_paper_row(paper: &PaperRecord) {
    println!(
        "  [{}] {} — {} | {} | {} | {} citations | {} | {}",
        paper.id,
        paper.title,
        paper.first_author,
        paper.domain,
        paper.stage,
        paper.citation_count,
        paper.impact,
        paper.date_added
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(db_path: &Path, host: &str, port: u16) -> Result<(), ShelfmarkError> {
    let store = load_store(db_path)?;

    println!("Shelfmark Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Corpus:   {} ({} papers)", db_path.display(), store.len());
    println!();

    let state = AppState::with_data_path(store, db_path.to_path_buf());
    api::run_server(&format!("{}:{}", host, port), state).await
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List papers matching the given filters.
pub fn cmd_list(
    db_path: &Path,
    json_mode: bool,
    stages: &[String],
    domains: &[String],
    impacts: &[String],
    added_within: &str,
) -> Result<(), ShelfmarkError> {
    let mut criteria = FilterCriteria::new().with_window(parse_window(added_within)?);
    for name in stages {
        criteria.stages.insert(parse_stage(name)?);
    }
    for name in domains {
        criteria.domains.insert(parse_domain(name)?);
    }
    for name in impacts {
        criteria.impacts.insert(parse_impact(name)?);
    }

    let store = load_store(db_path)?;
    let papers = Corpus::snapshot(&store).list(&criteria, Local::now().date_naive());

    if json_mode {
        return print_json(&papers);
    }

    if papers.is_empty() {
        println!("No papers found.");
        return Ok(());
    }
    println!("Papers ({}):", papers.len());
    for paper in &papers {
        print_paper_row(paper);
    }
    Ok(())
}

// =============================================================================
// ANALYTICS COMMAND
// =============================================================================

/// Show corpus analytics.
pub fn cmd_analytics(db_path: &Path, json_mode: bool) -> Result<(), ShelfmarkError> {
    let store = load_store(db_path)?;
    let analytics = Corpus::snapshot(&store).analytics();

    if json_mode {
        return print_json(&AnalyticsJson::from_result(&analytics));
    }

    println!("Corpus Summary:");
    println!("  Total papers:     {}", analytics.summary.total_papers);
    println!("  Fully read:       {}", analytics.summary.fully_read_count);
    println!("  Completion rate:  {}%", analytics.summary.completion_rate);
    println!();

    println!("Reading Stage Funnel:");
    for entry in &analytics.stage_funnel {
        println!(
            "  {:<18} {:>4}  {}",
            entry.stage,
            entry.count,
            "#".repeat(entry.count.min(60))
        );
    }
    println!();

    if !analytics.summary.avg_citations_tenths.is_empty() {
        println!("Average Citations by Domain:");
        for (domain, tenths) in &analytics.summary.avg_citations_tenths {
            println!("  {:<18} {}.{}", domain, tenths / 10, tenths % 10);
        }
    }
    Ok(())
}

// =============================================================================
// MUTATION COMMANDS
// =============================================================================

/// Add a paper to the corpus.
pub fn cmd_add(
    db_path: &Path,
    json_mode: bool,
    title: &str,
    author: &str,
    domain: &str,
    stage: &str,
    citations: u64,
    impact: &str,
    date: Option<&str>,
) -> Result<(), ShelfmarkError> {
    let draft = PaperDraft {
        title: title.to_string(),
        first_author: author.to_string(),
        domain: parse_domain(domain)?,
        stage: parse_stage(stage)?,
        citation_count: citations,
        impact: parse_impact(impact)?,
        date_added: match date {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        },
    };

    let mut store = load_store(db_path)?;
    let record = store.create(draft)?;
    save_store(db_path, &store)?;

    if json_mode {
        return print_json(&record);
    }
    println!("Added:");
    print_paper_row(&record);
    Ok(())
}

/// Update a paper in place.
pub fn cmd_update(
    db_path: &Path,
    json_mode: bool,
    id: u64,
    title: Option<String>,
    author: Option<String>,
    domain: Option<String>,
    stage: Option<String>,
    citations: Option<u64>,
    impact: Option<String>,
) -> Result<(), ShelfmarkError> {
    let patch = PaperPatch {
        title,
        first_author: author,
        domain: domain.as_deref().map(parse_domain).transpose()?,
        stage: stage.as_deref().map(parse_stage).transpose()?,
        citation_count: citations,
        impact: impact.as_deref().map(parse_impact).transpose()?,
        date_added: None,
    };

    let mut store = load_store(db_path)?;
    let record = store.update(PaperId(id), patch)?;
    save_store(db_path, &store)?;

    if json_mode {
        return print_json(&record);
    }
    println!("Updated:");
    print_paper_row(&record);
    Ok(())
}

/// Delete a paper.
pub fn cmd_remove(db_path: &Path, json_mode: bool, id: u64) -> Result<(), ShelfmarkError> {
    let mut store = load_store(db_path)?;
    let record = store.delete(PaperId(id))?;
    save_store(db_path, &store)?;

    if json_mode {
        return print_json(&record);
    }
    println!("Removed:");
    print_paper_row(&record);
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new empty data file.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), ShelfmarkError> {
    if db_path.exists() && !force {
        return Err(ShelfmarkError::Io(format!(
            "Data file {} already exists (use --force to overwrite)",
            db_path.display()
        )));
    }

    save_store(db_path, &shelfmark_core::MemoryStore::new())?;
    println!("Initialized empty corpus at {}", db_path.display());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
