//! Sexagenary Pillar Calculator
//!
//! Year, month and hour pillars come from modular arithmetic and the fixed
//! tables. The day pillar cannot be derived here with confidence and is
//! always obtained from a [`DaySexagenaryLookup`]; if that fails the whole
//! calculation fails, because every derived attribute hangs off the day stem.

mod day_lookup;

pub use day_lookup::{JulianDayLookup, TableDayLookup};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::calendar::solar_term;
use crate::calendar::AuthorityGanzi;
use crate::config::YearBoundary;
use crate::error::{SajuError, SajuResult};
use crate::ganji::tables::{self, SOLAR_TERMS};
use crate::ganji::{Branch, Stem, StemBranch};

/// Source of the day pillar for a solar date
#[async_trait]
pub trait DaySexagenaryLookup: Send + Sync {
    async fn lookup_day_sexagenary(&self, date: NaiveDate) -> Result<StemBranch>;
}

/// The four raw pillars, before annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pillars {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour: StemBranch,
}

/// `(year - 4) mod 10` over `(year - 4) mod 12`; year 4 is 甲子.
pub fn year_pillar(year: i32) -> StemBranch {
    let n = i64::from(year) - 4;
    StemBranch::new(Stem::from_index(n), Branch::from_index(n))
}

pub fn month_pillar(year_stem: Stem, date: NaiveDate) -> StemBranch {
    let branch = solar_term::resolve_month_branch(date);
    StemBranch::new(tables::month_stem(year_stem, branch), branch)
}

/// Branch index is `((hour + 1) / 2) mod 12`, so 23:00 already belongs to 子.
pub fn hour_branch(hour: u32) -> Branch {
    Branch::from_index(i64::from((hour + 1) / 2))
}

/// Hour stems restart every five days, anchored on the day stem.
pub fn hour_pillar(day_stem: Stem, hour: u32) -> StemBranch {
    let branch = hour_branch(hour);
    let stem_index = (day_stem.index() % 5) * 2 + branch.index();
    StemBranch::new(Stem::from_index(stem_index as i64), branch)
}

pub struct PillarCalculator {
    day_lookup: Arc<dyn DaySexagenaryLookup>,
    timeout: Duration,
    year_boundary: YearBoundary,
}

impl PillarCalculator {
    pub fn new(day_lookup: Arc<dyn DaySexagenaryLookup>, timeout: Duration) -> Self {
        Self {
            day_lookup,
            timeout,
            year_boundary: YearBoundary::default(),
        }
    }

    pub fn with_year_boundary(mut self, year_boundary: YearBoundary) -> Self {
        self.year_boundary = year_boundary;
        self
    }

    /// Year the year pillar is counted from.
    pub fn pillar_year(&self, date: NaiveDate) -> i32 {
        match self.year_boundary {
            YearBoundary::Gregorian => date.year(),
            YearBoundary::SpringBegins => {
                let ipchun = &SOLAR_TERMS[1];
                if (date.month(), date.day()) < (ipchun.month, ipchun.day) {
                    date.year() - 1
                } else {
                    date.year()
                }
            }
        }
    }

    /// Fetches the day pillar, bounded by the configured timeout.
    pub async fn lookup_day(&self, date: NaiveDate) -> SajuResult<StemBranch> {
        debug!("Looking up day pillar for {}", date);
        match tokio::time::timeout(self.timeout, self.day_lookup.lookup_day_sexagenary(date)).await {
            Ok(Ok(day)) => Ok(day),
            Ok(Err(e)) => Err(SajuError::DayPillarUnavailable {
                date,
                reason: format!("{:#}", e),
            }),
            Err(_) => Err(SajuError::DayPillarUnavailable {
                date,
                reason: format!("lookup timed out after {:?}", self.timeout),
            }),
        }
    }

    /// Builds the four pillars once the day pillar is known. Authority
    /// pillars, when present, replace the computed year and the given day.
    pub fn assemble(&self, date: NaiveDate, hour: u32, day: StemBranch, authority: &AuthorityGanzi) -> Pillars {
        let year = authority.year.unwrap_or_else(|| year_pillar(self.pillar_year(date)));
        let day = authority.day.unwrap_or(day);
        Pillars {
            year,
            month: month_pillar(year.stem, date),
            day,
            hour: hour_pillar(day.stem, hour),
        }
    }

    pub async fn compute(&self, date: NaiveDate, hour: u32) -> SajuResult<Pillars> {
        let day = self.lookup_day(date).await?;
        Ok(self.assemble(date, hour, day, &AuthorityGanzi::default()))
    }
}
