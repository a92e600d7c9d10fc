//! Four Pillars Engine
//!
//! Runs the pipeline: calendar conversion → solar-term month → pillars →
//! annotation → assembled chart.

mod input;
pub mod result;

pub use input::{BirthDate, BirthInput, CalendarType, ParsedBirth};
pub use result::FourPillars;

use std::sync::Arc;
use tracing::{debug, info};

use crate::calendar::{CalendarConverter, SolarToLunar};
use crate::config::EngineConfig;
use crate::error::SajuResult;
use crate::pillars::{JulianDayLookup, PillarCalculator};
use crate::providers::KasiClient;

pub struct SajuEngine {
    converter: CalendarConverter,
    calculator: PillarCalculator,
}

impl SajuEngine {
    pub fn new(converter: CalendarConverter, calculator: PillarCalculator) -> Self {
        Self { converter, calculator }
    }

    /// KASI-backed engine when a service key is configured, otherwise an
    /// offline one (approximate lunar dates, Julian-day day pillars).
    pub fn from_config(config: &EngineConfig) -> Self {
        let timeout = config.request_timeout();
        let (converter, calculator) = match KasiClient::from_config(config) {
            Some(client) => {
                let client = Arc::new(client);
                (CalendarConverter::new(client.clone(), timeout), PillarCalculator::new(client, timeout))
            }
            None => {
                info!("No KASI service key configured; running offline");
                (CalendarConverter::offline(), PillarCalculator::new(Arc::new(JulianDayLookup), timeout))
            }
        };
        Self::new(converter, calculator.with_year_boundary(config.year_boundary))
    }

    /// Fails only when the input is malformed or the day pillar cannot be
    /// resolved.
    pub async fn compute_four_pillars(&self, input: &BirthInput) -> SajuResult<FourPillars> {
        let birth = input.parse()?;
        self.compute_parsed(&birth).await
    }

    pub async fn compute_parsed(&self, birth: &ParsedBirth) -> SajuResult<FourPillars> {
        let (solar, lunar, ganzi, source, day) = match birth.date {
            BirthDate::Solar(solar) => {
                // conversion and day lookup only need the solar date
                let (SolarToLunar { lunar, ganzi, source }, looked_up) = tokio::join!(
                    self.converter.solar_to_lunar(solar),
                    self.calculator.lookup_day(solar)
                );
                let day = match (ganzi.day, looked_up) {
                    (Some(day), Err(e)) => {
                        debug!("Day lookup failed ({}); using authority day pillar {}", e, day);
                        day
                    }
                    (Some(day), Ok(_)) | (None, Ok(day)) => day,
                    (None, Err(e)) => return Err(e),
                };
                (solar, lunar, ganzi, source, day)
            }
            BirthDate::Lunar(lunar) => {
                let converted = self.converter.lunar_to_solar(lunar).await;
                let day = match converted.ganzi.day {
                    Some(day) => day,
                    None => self.calculator.lookup_day(converted.solar).await?,
                };
                (converted.solar, lunar, converted.ganzi, converted.source, day)
            }
        };

        debug!("Resolved {} (lunar {}) day pillar {}", solar, lunar, day);

        let pillars = self.calculator.assemble(solar, birth.hour, day, &ganzi);
        Ok(result::assemble(&pillars, solar, lunar, source))
    }
}
