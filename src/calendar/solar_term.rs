//! Solar Term Resolver
//!
//! Finds the month branch of a solar date from the twelve major terms. Each
//! term owns the window from its nominal onset to the day before the next
//! term; the 대설 window wraps into the following January.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::ganji::tables::{SolarTerm, SOLAR_TERMS};
use crate::ganji::Branch;

/// Returned when no window matches. Full-year coverage makes this
/// unreachable for valid dates.
pub const DEFAULT_MONTH_BRANCH: Branch = Branch::In;

/// One term's span within a particular year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermWindow {
    pub term: &'static SolarTerm,
    pub start: NaiveDate,
    /// Inclusive
    pub end: NaiveDate,
}

impl TermWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn onset(year: i32, term: &SolarTerm) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, term.month, term.day)
}

/// The twelve windows that start in `year`.
pub fn windows(year: i32) -> Vec<TermWindow> {
    let mut out = Vec::with_capacity(SOLAR_TERMS.len());
    for (i, term) in SOLAR_TERMS.iter().enumerate() {
        let next = match SOLAR_TERMS.get(i + 1) {
            Some(next) => onset(year, next),
            None => onset(year + 1, &SOLAR_TERMS[0]),
        };
        if let (Some(start), Some(end)) = (onset(year, term), next.and_then(|d| d.pred_opt())) {
            out.push(TermWindow { term, start, end });
        }
    }
    out
}

/// Term whose window contains `date`.
pub fn term_for(date: NaiveDate) -> Option<&'static SolarTerm> {
    // dates before 소한 sit in the previous year's 대설 window
    [date.year(), date.year() - 1]
        .into_iter()
        .flat_map(windows)
        .find(|w| w.contains(date))
        .map(|w| w.term)
}

pub fn resolve_month_branch(date: NaiveDate) -> Branch {
    match term_for(date) {
        Some(term) => term.branch,
        None => {
            warn!("No solar-term window covers {}; defaulting month branch to {}", date, DEFAULT_MONTH_BRANCH);
            DEFAULT_MONTH_BRANCH
        }
    }
}
