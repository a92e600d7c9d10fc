//! Calendar Conversion Service
//!
//! Solar (Gregorian) ↔ lunar conversion. The calendrical authority is asked
//! first; when it is slow, unreachable or returns garbage, the converter
//! degrades to an approximate local shift and says so in the result.

pub mod fallback;
pub mod solar_term;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::ganji::StemBranch;

/// A date in the Korean lunisolar calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
}

impl LunarDate {
    /// Returns `None` unless month is 1..=12 and day is 1..=30.
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return None;
        }
        Some(Self { year, month, day, is_leap_month })
    }

    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso())?;
        if self.is_leap_month {
            write!(f, " (윤)")?;
        }
        Ok(())
    }
}

/// Where a converted date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSource {
    Authority,
    /// Local day-offset heuristic; no leap-month detection
    Approximate,
}

/// Sexagenary strings the authority returns alongside a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityGanzi {
    pub year: Option<StemBranch>,
    pub month: Option<StemBranch>,
    pub day: Option<StemBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarToLunar {
    pub lunar: LunarDate,
    pub ganzi: AuthorityGanzi,
    pub source: ConversionSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LunarToSolar {
    pub solar: NaiveDate,
    pub ganzi: AuthorityGanzi,
    pub source: ConversionSource,
}

/// External calendrical data provider
#[async_trait]
pub trait CalendarAuthority: Send + Sync {
    async fn solar_to_lunar(&self, solar: NaiveDate) -> Result<(LunarDate, AuthorityGanzi)>;
    async fn lunar_to_solar(&self, lunar: LunarDate) -> Result<(NaiveDate, AuthorityGanzi)>;
}

/// Authority-first converter that never fails
pub struct CalendarConverter {
    authority: Option<Arc<dyn CalendarAuthority>>,
    timeout: Duration,
}

impl CalendarConverter {
    pub fn new(authority: Arc<dyn CalendarAuthority>, timeout: Duration) -> Self {
        Self { authority: Some(authority), timeout }
    }

    /// Converter with no authority at all; every answer is approximate.
    pub fn offline() -> Self {
        Self { authority: None, timeout: Duration::ZERO }
    }

    pub async fn solar_to_lunar(&self, solar: NaiveDate) -> SolarToLunar {
        if let Some(authority) = &self.authority {
            debug!("Converting solar {} to lunar via authority", solar);
            match tokio::time::timeout(self.timeout, authority.solar_to_lunar(solar)).await {
                Ok(Ok((lunar, ganzi))) => {
                    return SolarToLunar { lunar, ganzi, source: ConversionSource::Authority };
                }
                Ok(Err(e)) => warn!("Solar→lunar lookup failed for {}: {:#}; using approximate conversion", solar, e),
                Err(_) => warn!("Solar→lunar lookup timed out for {}; using approximate conversion", solar),
            }
        }
        SolarToLunar {
            lunar: fallback::approximate_lunar(solar),
            ganzi: AuthorityGanzi::default(),
            source: ConversionSource::Approximate,
        }
    }

    pub async fn lunar_to_solar(&self, lunar: LunarDate) -> LunarToSolar {
        if let Some(authority) = &self.authority {
            debug!("Converting lunar {} to solar via authority", lunar);
            match tokio::time::timeout(self.timeout, authority.lunar_to_solar(lunar)).await {
                Ok(Ok((solar, ganzi))) => {
                    return LunarToSolar { solar, ganzi, source: ConversionSource::Authority };
                }
                Ok(Err(e)) => warn!("Lunar→solar lookup failed for {}: {:#}; using approximate conversion", lunar, e),
                Err(_) => warn!("Lunar→solar lookup timed out for {}; using approximate conversion", lunar),
            }
        }
        LunarToSolar {
            solar: fallback::approximate_solar(lunar),
            ganzi: AuthorityGanzi::default(),
            source: ConversionSource::Approximate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FailingAuthority;

    #[async_trait]
    impl CalendarAuthority for FailingAuthority {
        async fn solar_to_lunar(&self, _solar: NaiveDate) -> Result<(LunarDate, AuthorityGanzi)> {
            Err(anyhow!("connection refused"))
        }
        async fn lunar_to_solar(&self, _lunar: LunarDate) -> Result<(NaiveDate, AuthorityGanzi)> {
            Err(anyhow!("connection refused"))
        }
    }

    struct SlowAuthority;

    #[async_trait]
    impl CalendarAuthority for SlowAuthority {
        async fn solar_to_lunar(&self, _solar: NaiveDate) -> Result<(LunarDate, AuthorityGanzi)> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(anyhow!("unreachable"))
        }
        async fn lunar_to_solar(&self, _lunar: LunarDate) -> Result<(NaiveDate, AuthorityGanzi)> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(anyhow!("unreachable"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lunar_date_validation() {
        assert!(LunarDate::new(2020, 4, 30, true).is_some());
        assert!(LunarDate::new(2020, 13, 1, false).is_none());
        assert!(LunarDate::new(2020, 1, 31, false).is_none());
        assert!(LunarDate::new(2020, 1, 0, false).is_none());
        assert_eq!(LunarDate::new(1990, 4, 21, false).unwrap().iso(), "1990-04-21");
    }

    #[tokio::test]
    async fn test_error_falls_back() {
        let converter = CalendarConverter::new(Arc::new(FailingAuthority), Duration::from_secs(2));
        let result = converter.solar_to_lunar(date(1990, 5, 15)).await;
        assert_eq!(result.source, ConversionSource::Approximate);
        assert!(!result.lunar.is_leap_month);
        assert_eq!(result.ganzi, AuthorityGanzi::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let converter = CalendarConverter::new(Arc::new(SlowAuthority), Duration::from_secs(2));
        let lunar = LunarDate::new(1990, 4, 21, true).unwrap();
        let result = converter.lunar_to_solar(lunar).await;
        assert_eq!(result.source, ConversionSource::Approximate);
        assert_eq!(result.solar, fallback::approximate_solar(lunar));
    }

    #[tokio::test]
    async fn test_offline_is_approximate() {
        let converter = CalendarConverter::offline();
        let result = converter.solar_to_lunar(date(2000, 1, 1)).await;
        assert_eq!(result.source, ConversionSource::Approximate);
    }
}
