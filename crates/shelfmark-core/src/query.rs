//! # Query Module
//!
//! Structured filter criteria for corpus queries.
//!
//! - Multi-valued selections are sets: OR within a field, AND across fields
//! - An empty selection set means "do not filter on this field"
//! - Date windows are resolved against a caller-supplied evaluation
//!   instant, never against ambient wall-clock time

use crate::{ImpactScore, ReadingStage, ResearchDomain};
use chrono::NaiveDate;
use std::collections::BTreeSet;

// =============================================================================
// DATE WINDOW
// =============================================================================

/// Rolling date window ending at the evaluation instant.
///
/// "This Month" is a fixed 30-day rolling window, not a calendar month;
/// a rolling window keeps evaluation deterministic and avoids end-of-month
/// boundary cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DateWindow {
    /// The 7 days ending at `now`, inclusive.
    ThisWeek,
    /// The 30 days ending at `now`, inclusive.
    ThisMonth,
    /// The 90 days ending at `now`, inclusive.
    LastThreeMonths,
    /// No date constraint.
    #[default]
    AllTime,
}

impl DateWindow {
    /// The selectable windows, in display order.
    pub const ALL: [DateWindow; 4] = [
        DateWindow::ThisWeek,
        DateWindow::ThisMonth,
        DateWindow::LastThreeMonths,
        DateWindow::AllTime,
    ];

    /// Get the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DateWindow::ThisWeek => "This Week",
            DateWindow::ThisMonth => "This Month",
            DateWindow::LastThreeMonths => "Last 3 Months",
            DateWindow::AllTime => "All time",
        }
    }

    /// Parse a display name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|w| w.as_str() == name)
    }

    /// Window length in days, `None` for the unbounded window.
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        match self {
            DateWindow::ThisWeek => Some(7),
            DateWindow::ThisMonth => Some(30),
            DateWindow::LastThreeMonths => Some(90),
            DateWindow::AllTime => None,
        }
    }

    /// Whether `date` falls inside this window, evaluated at `now`.
    ///
    /// Both bounds are inclusive: a record dated exactly `days` before
    /// `now` is in, one day older is out. The window ends at `now`, so
    /// future-dated records fall outside every bounded window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate, now: NaiveDate) -> bool {
        match self.days() {
            None => true,
            Some(days) => {
                let age = now.signed_duration_since(date).num_days();
                (0..=days).contains(&age)
            }
        }
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FILTER CRITERIA
// =============================================================================

/// Request-scoped, immutable filter value.
///
/// Constructed per request and discarded; never persisted. `BTreeSet`
/// keeps membership iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Allowed reading stages. Empty = unrestricted.
    pub stages: BTreeSet<ReadingStage>,
    /// Allowed research domains. Empty = unrestricted.
    pub domains: BTreeSet<ResearchDomain>,
    /// Allowed impact scores. Empty = unrestricted.
    pub impacts: BTreeSet<ImpactScore>,
    /// Date window, default "All time".
    pub window: DateWindow,
}

impl FilterCriteria {
    /// Create match-all criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stage to the selection.
    #[must_use]
    pub fn with_stage(mut self, stage: ReadingStage) -> Self {
        self.stages.insert(stage);
        self
    }

    /// Add a domain to the selection.
    #[must_use]
    pub fn with_domain(mut self, domain: ResearchDomain) -> Self {
        self.domains.insert(domain);
        self
    }

    /// Add an impact score to the selection.
    #[must_use]
    pub fn with_impact(mut self, impact: ImpactScore) -> Self {
        self.impacts.insert(impact);
        self
    }

    /// Set the date window.
    #[must_use]
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Whether these criteria match every record (the permissive default).
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.stages.is_empty()
            && self.domains.is_empty()
            && self.impacts.is_empty()
            && self.window == DateWindow::AllTime
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn default_criteria_are_unrestricted() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_unrestricted());
        assert_eq!(criteria.window, DateWindow::AllTime);
    }

    #[test]
    fn builder_accumulates_selections() {
        let criteria = FilterCriteria::new()
            .with_stage(ReadingStage::FullyRead)
            .with_stage(ReadingStage::AbstractRead)
            .with_domain(ResearchDomain::Biology)
            .with_impact(ImpactScore::High)
            .with_window(DateWindow::ThisWeek);

        assert_eq!(criteria.stages.len(), 2);
        assert!(!criteria.is_unrestricted());
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let now = date(2024, 6, 15);
        // Exactly 7 days before now: in. 8 days: out.
        assert!(DateWindow::ThisWeek.contains(date(2024, 6, 8), now));
        assert!(!DateWindow::ThisWeek.contains(date(2024, 6, 7), now));
        // The evaluation day itself is in.
        assert!(DateWindow::ThisWeek.contains(now, now));
    }

    #[test]
    fn bounded_windows_exclude_future_dates() {
        let now = date(2024, 6, 15);
        assert!(!DateWindow::ThisWeek.contains(date(2024, 6, 16), now));
        assert!(DateWindow::AllTime.contains(date(2024, 6, 16), now));
    }

    #[test]
    fn month_window_is_a_rolling_thirty_days() {
        let now = date(2024, 3, 31);
        // 2024-03-01 is exactly 30 days before now: in. One day older: out.
        assert!(DateWindow::ThisMonth.contains(date(2024, 3, 1), now));
        assert!(!DateWindow::ThisMonth.contains(date(2024, 2, 29), now));
    }

    #[test]
    fn window_names_round_trip() {
        for window in DateWindow::ALL {
            assert_eq!(DateWindow::from_name(window.as_str()), Some(window));
        }
        assert_eq!(DateWindow::from_name("Yesterday"), None);
    }
}
