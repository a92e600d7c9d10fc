use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::LunarDate;
use crate::error::{SajuError, SajuResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    Solar,
    Lunar,
}

/// Birth data as received from the application layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    /// "YYYY-MM-DD" or "YYYYMMDD"
    pub birth_date: String,
    /// "HH:MM" or "HHMM"
    pub birth_time: String,
    pub calendar_type: CalendarType,
    /// Only meaningful for lunar input
    #[serde(default)]
    pub is_leap_month: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BirthDate {
    Solar(NaiveDate),
    Lunar(LunarDate),
}

/// Validated birth input; also serves as the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedBirth {
    pub date: BirthDate,
    pub hour: u32,
    pub minute: u32,
}

impl BirthInput {
    pub fn solar(birth_date: impl Into<String>, birth_time: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: birth_time.into(),
            calendar_type: CalendarType::Solar,
            is_leap_month: false,
        }
    }

    pub fn lunar(birth_date: impl Into<String>, birth_time: impl Into<String>, is_leap_month: bool) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: birth_time.into(),
            calendar_type: CalendarType::Lunar,
            is_leap_month,
        }
    }

    pub fn parse(&self) -> SajuResult<ParsedBirth> {
        let (year, month, day) =
            split_date(&self.birth_date).ok_or_else(|| SajuError::InvalidBirthDate(self.birth_date.clone()))?;
        let (hour, minute) =
            split_time(&self.birth_time).ok_or_else(|| SajuError::InvalidBirthTime(self.birth_time.clone()))?;

        let date = match self.calendar_type {
            CalendarType::Solar => NaiveDate::from_ymd_opt(year, month, day)
                .map(BirthDate::Solar)
                .ok_or_else(|| SajuError::InvalidBirthDate(self.birth_date.clone()))?,
            CalendarType::Lunar => LunarDate::new(year, month, day, self.is_leap_month)
                .map(BirthDate::Lunar)
                .ok_or_else(|| SajuError::InvalidLunarDate(self.birth_date.clone()))?,
        };
        Ok(ParsedBirth { date, hour, minute })
    }
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn split_date(raw: &str) -> Option<(i32, u32, u32)> {
    let raw = raw.trim();
    let (y, m, d) = match raw.len() {
        10 if raw.as_bytes()[4] == b'-' && raw.as_bytes()[7] == b'-' => (&raw[0..4], &raw[5..7], &raw[8..10]),
        8 => (raw.get(0..4)?, raw.get(4..6)?, raw.get(6..8)?),
        _ => return None,
    };
    Some((digits(y)? as i32, digits(m)?, digits(d)?))
}

fn split_time(raw: &str) -> Option<(u32, u32)> {
    let raw = raw.trim();
    let (h, m) = match raw.len() {
        5 if raw.as_bytes()[2] == b':' => (&raw[0..2], &raw[3..5]),
        4 => (raw.get(0..2)?, raw.get(2..4)?),
        _ => return None,
    };
    let (hour, minute) = (digits(h)?, digits(m)?);
    (hour < 24 && minute < 60).then_some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        assert_eq!(split_date("1990-05-15"), Some((1990, 5, 15)));
        assert_eq!(split_date("19900515"), Some((1990, 5, 15)));
        assert_eq!(split_date("1990/05/15"), None);
        assert_eq!(split_date("1990-5-15"), None);
        assert_eq!(split_date("199005"), None);
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(split_time("14:30"), Some((14, 30)));
        assert_eq!(split_time("0705"), Some((7, 5)));
        assert_eq!(split_time("24:00"), None);
        assert_eq!(split_time("12:60"), None);
        assert_eq!(split_time("1:30"), None);
    }

    #[test]
    fn test_parse_solar() {
        let parsed = BirthInput::solar("1990-05-15", "14:30").parse().unwrap();
        assert_eq!(parsed.date, BirthDate::Solar(NaiveDate::from_ymd_opt(1990, 5, 15).unwrap()));
        assert_eq!((parsed.hour, parsed.minute), (14, 30));
    }

    #[test]
    fn test_parse_lunar_day_thirty() {
        let parsed = BirthInput::lunar("20230230", "0000", true).parse().unwrap();
        assert_eq!(parsed.date, BirthDate::Lunar(LunarDate::new(2023, 2, 30, true).unwrap()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            BirthInput::solar("2023-02-30", "12:00").parse(),
            Err(SajuError::InvalidBirthDate(_))
        ));
        assert!(matches!(
            BirthInput::solar("2023-02-01", "noon").parse(),
            Err(SajuError::InvalidBirthTime(_))
        ));
        assert!(matches!(
            BirthInput::lunar("2023-13-01", "12:00", false).parse(),
            Err(SajuError::InvalidLunarDate(_))
        ));
    }

    #[test]
    fn test_json_shape() {
        let input: BirthInput = serde_json::from_str(
            r#"{"birthDate": "1990-05-15", "birthTime": "14:30", "calendarType": "solar"}"#,
        )
        .unwrap();
        assert_eq!(input, BirthInput::solar("1990-05-15", "14:30"));
    }
}
