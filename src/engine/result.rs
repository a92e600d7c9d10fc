//! Result Assembler

use chrono::NaiveDate;
use serde::Serialize;

use crate::annotate::{annotate, AnnotatedPillar, AnnotationContext, PillarRole};
use crate::calendar::{ConversionSource, LunarDate};
use crate::pillars::Pillars;

/// Final four-pillar chart handed to the analysis layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FourPillars {
    pub year: AnnotatedPillar,
    pub month: AnnotatedPillar,
    pub day: AnnotatedPillar,
    pub hour: AnnotatedPillar,
    pub solar_date: String,
    pub lunar_date: String,
    pub is_leap_month: bool,
    /// `approximate` when the lunar date came from the local fallback
    pub lunar_source: ConversionSource,
}

impl FourPillars {
    /// Pillars in year, month, day, hour order.
    pub fn pillars(&self) -> [&AnnotatedPillar; 4] {
        [&self.year, &self.month, &self.day, &self.hour]
    }

    pub fn raw(&self) -> Pillars {
        Pillars {
            year: self.year.pair(),
            month: self.month.pair(),
            day: self.day.pair(),
            hour: self.hour.pair(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.lunar_source == ConversionSource::Approximate
    }
}

pub fn assemble(pillars: &Pillars, solar: NaiveDate, lunar: LunarDate, lunar_source: ConversionSource) -> FourPillars {
    let annotate_as = |role: PillarRole| {
        let pillar = match role {
            PillarRole::Year => pillars.year,
            PillarRole::Month => pillars.month,
            PillarRole::Day => pillars.day,
            PillarRole::Hour => pillars.hour,
        };
        annotate(
            pillar,
            AnnotationContext {
                day_stem: pillars.day.stem,
                year_branch: pillars.year.branch,
                role,
            },
        )
    };

    FourPillars {
        year: annotate_as(PillarRole::Year),
        month: annotate_as(PillarRole::Month),
        day: annotate_as(PillarRole::Day),
        hour: annotate_as(PillarRole::Hour),
        solar_date: solar.format("%Y-%m-%d").to_string(),
        lunar_date: lunar.iso(),
        is_leap_month: lunar.is_leap_month,
        lunar_source,
    }
}
