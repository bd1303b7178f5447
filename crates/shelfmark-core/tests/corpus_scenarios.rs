//! # Corpus Scenarios
//!
//! End-to-end scenarios through the Query Facade: store, snapshot,
//! filter, analytics. These pin the documented reference behaviors.

use chrono::NaiveDate;
use shelfmark_core::{
    Corpus, DateWindow, FilterCriteria, ImpactScore, MemoryStore, PaperDraft, ReadingStage,
    RecordStore, ResearchDomain,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn draft(
    title: &str,
    domain: ResearchDomain,
    stage: ReadingStage,
    citations: u64,
    added: NaiveDate,
) -> PaperDraft {
    PaperDraft {
        title: title.to_string(),
        first_author: "Franklin".to_string(),
        domain,
        stage,
        citation_count: citations,
        impact: ImpactScore::Unknown,
        date_added: added,
    }
}

/// Five Computer Science papers, stages {Abstract Read x2, Fully Read x3},
/// citations {10, 20, 30, 5, 15}.
fn reference_store(added: NaiveDate) -> MemoryStore {
    let mut store = MemoryStore::new();
    let rows = [
        (ReadingStage::AbstractRead, 10),
        (ReadingStage::AbstractRead, 20),
        (ReadingStage::FullyRead, 30),
        (ReadingStage::FullyRead, 5),
        (ReadingStage::FullyRead, 15),
    ];
    for (i, (stage, citations)) in rows.into_iter().enumerate() {
        store
            .create(draft(
                &format!("CS Paper {i}"),
                ResearchDomain::ComputerScience,
                stage,
                citations,
                added,
            ))
            .expect("create");
    }
    store
}

#[test]
fn reference_corpus_analytics() {
    let store = reference_store(date(2024, 6, 1));
    let analytics = Corpus::snapshot(&store).analytics();

    let funnel: Vec<(ReadingStage, usize)> = analytics
        .stage_funnel
        .iter()
        .map(|s| (s.stage, s.count))
        .collect();
    assert_eq!(
        funnel,
        vec![
            (ReadingStage::AbstractRead, 2),
            (ReadingStage::IntroductionDone, 0),
            (ReadingStage::MethodologyDone, 0),
            (ReadingStage::ResultsAnalyzed, 0),
            (ReadingStage::FullyRead, 3),
            (ReadingStage::NotesCompleted, 0),
        ]
    );

    assert_eq!(analytics.summary.completion_rate, 60);
    assert_eq!(
        analytics.summary.avg_citations_tenths[&ResearchDomain::ComputerScience],
        160
    );
}

#[test]
fn filtering_for_an_absent_domain_yields_the_empty_degenerate() {
    let store = reference_store(date(2024, 6, 1));
    let corpus = Corpus::snapshot(&store);

    let criteria = FilterCriteria::new().with_domain(ResearchDomain::Biology);
    let matched = corpus.list(&criteria, date(2024, 6, 2));
    assert!(matched.is_empty());

    // Analytics over the filtered subset are degenerate, not an error.
    let filtered = Corpus::from_records(matched);
    let summary = filtered.analytics().summary;
    assert_eq!(summary.total_papers, 0);
    assert_eq!(summary.completion_rate, 0);
    assert!(summary.avg_citations_tenths.is_empty());
}

#[test]
fn this_week_window_boundary_through_the_facade() {
    let now = date(2024, 6, 15);
    let mut store = MemoryStore::new();
    store
        .create(draft(
            "On the boundary",
            ResearchDomain::Physics,
            ReadingStage::AbstractRead,
            1,
            now - chrono::Duration::days(7),
        ))
        .expect("create");
    store
        .create(draft(
            "Just outside",
            ResearchDomain::Physics,
            ReadingStage::AbstractRead,
            1,
            now - chrono::Duration::days(8),
        ))
        .expect("create");

    let corpus = Corpus::snapshot(&store);
    let criteria = FilterCriteria::new().with_window(DateWindow::ThisWeek);
    let matched = corpus.list(&criteria, now);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "On the boundary");
}

#[test]
fn list_filters_do_not_affect_analytics() {
    let store = reference_store(date(2024, 6, 1));
    let corpus = Corpus::snapshot(&store);

    // A restrictive list view...
    let criteria = FilterCriteria::new().with_stage(ReadingStage::FullyRead);
    assert_eq!(corpus.list(&criteria, date(2024, 6, 2)).len(), 3);

    // ...leaves analytics computed over the full corpus.
    assert_eq!(corpus.analytics().summary.total_papers, 5);
}

#[test]
fn mutations_reflect_in_the_next_snapshot_only() {
    let mut store = reference_store(date(2024, 6, 1));
    let before = Corpus::snapshot(&store);

    let target = before.records()[0].id;
    store.delete(target).expect("delete");

    assert_eq!(before.analytics().summary.total_papers, 5);
    assert_eq!(Corpus::snapshot(&store).analytics().summary.total_papers, 4);
}

#[test]
fn corrupted_snapshot_values_degrade_gracefully() {
    // A stored snapshot with a value outside the closed vocabularies:
    // deserialization falls back instead of failing, totals still
    // reconcile, and category views skip the stray record.
    let json = r#"[
        {
            "id": 0,
            "paper_title": "Legit",
            "first_author_name": "Mendel",
            "research_domain": "Biology",
            "reading_stage": "Fully Read",
            "citation_count": 12,
            "impact_score": "High Impact",
            "date_added": "2024-05-01"
        },
        {
            "id": 1,
            "paper_title": "Stray",
            "first_author_name": "Nobody",
            "research_domain": "Astrology",
            "reading_stage": "Skimmed",
            "citation_count": 3,
            "impact_score": "Stellar",
            "date_added": "2024-05-02"
        }
    ]"#;

    let records: Vec<shelfmark_core::PaperRecord> =
        serde_json::from_str(json).expect("deserialize");
    let corpus = Corpus::from_records(records);
    let analytics = corpus.analytics();

    assert_eq!(analytics.summary.total_papers, 2);
    let funnel_sum: usize = analytics.stage_funnel.iter().map(|s| s.count).sum();
    assert_eq!(funnel_sum, 1);
    assert_eq!(analytics.domain_by_stage.len(), 1);
    assert_eq!(analytics.citation_by_impact.len(), 1);
}
