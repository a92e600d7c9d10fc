//! Offline day-pillar sources
//!
//! Stand-ins for the network lookup where calling out is undesirable: a
//! precomputed table, or the sexagenary count from the Julian day number.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::path::Path;

use super::DaySexagenaryLookup;
use crate::ganji::StemBranch;

/// Julian day number of 0001-01-01 (proleptic Gregorian) minus one.
const JDN_CE_OFFSET: i64 = 1_721_425;
/// JDN offset that puts 甲子 at index 0.
const SEXAGENARY_JDN_SHIFT: i64 = 49;

/// Day pillar counted from the Julian day number
#[derive(Debug, Clone, Copy, Default)]
pub struct JulianDayLookup;

impl JulianDayLookup {
    pub fn jdn(date: NaiveDate) -> i64 {
        i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET
    }

    pub fn day_pillar(date: NaiveDate) -> StemBranch {
        StemBranch::from_sexagenary(Self::jdn(date) + SEXAGENARY_JDN_SHIFT)
    }
}

#[async_trait]
impl DaySexagenaryLookup for JulianDayLookup {
    async fn lookup_day_sexagenary(&self, date: NaiveDate) -> Result<StemBranch> {
        Ok(Self::day_pillar(date))
    }
}

/// Precomputed date → day pillar table
#[derive(Debug, Clone, Default)]
pub struct TableDayLookup {
    days: HashMap<NaiveDate, StemBranch>,
}

impl TableDayLookup {
    pub fn new(days: HashMap<NaiveDate, StemBranch>) -> Self {
        Self { days }
    }

    /// Loads a JSON object mapping "YYYY-MM-DD" to a pillar string such as
    /// "경오" or "庚午".
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read day table {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(content).context("Day table is not a JSON object")?;
        let mut days = HashMap::with_capacity(raw.len());
        for (date, pillar) in raw {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Bad date key {:?} in day table", date))?;
            let pillar: StemBranch = pillar.parse()?;
            days.insert(date, pillar);
        }
        Ok(Self { days })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[async_trait]
impl DaySexagenaryLookup for TableDayLookup {
    async fn lookup_day_sexagenary(&self, date: NaiveDate) -> Result<StemBranch> {
        self.days
            .get(&date)
            .copied()
            .ok_or_else(|| anyhow!("no day pillar recorded for {}", date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganji::{Branch, Stem};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_julian_day_number() {
        assert_eq!(JulianDayLookup::jdn(date(2000, 1, 1)), 2_451_545);
        assert_eq!(JulianDayLookup::jdn(date(1970, 1, 1)), 2_440_588);
    }

    #[test]
    fn test_julian_day_pillars() {
        assert_eq!(JulianDayLookup::day_pillar(date(2000, 1, 1)), StemBranch::new(Stem::Mu, Branch::O));
        assert_eq!(JulianDayLookup::day_pillar(date(1970, 1, 1)), StemBranch::new(Stem::Sin, Branch::Sa));
        assert_eq!(JulianDayLookup::day_pillar(date(1990, 5, 15)), StemBranch::new(Stem::Gyeong, Branch::Jin));
    }

    #[test]
    fn test_consecutive_days_advance_cycle() {
        let mut day = date(1899, 12, 25);
        for _ in 0..200 {
            let today = JulianDayLookup::day_pillar(day).sexagenary_index().unwrap();
            day = day.succ_opt().unwrap();
            let tomorrow = JulianDayLookup::day_pillar(day).sexagenary_index().unwrap();
            assert_eq!(tomorrow, (today + 1) % 60);
        }
    }

    #[tokio::test]
    async fn test_table_lookup_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"1990-05-15": "경진", "2000-01-01": "戊午"}}"#).unwrap();
        let table = TableDayLookup::from_json_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup_day_sexagenary(date(1990, 5, 15)).await.unwrap(),
            StemBranch::new(Stem::Gyeong, Branch::Jin)
        );
        assert!(table.lookup_day_sexagenary(date(1990, 5, 16)).await.is_err());
    }

    #[test]
    fn test_table_rejects_bad_entries() {
        assert!(TableDayLookup::from_json_str(r#"{"1990-13-01": "경진"}"#).is_err());
        assert!(TableDayLookup::from_json_str(r#"{"1990-05-15": "경"}"#).is_err());
    }
}
