use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced to callers of the engine.
///
/// Conversion problems never show up here; they degrade to the approximate
/// calendar instead. Only a missing day pillar is structural.
#[derive(Debug, Error)]
pub enum SajuError {
    #[error("invalid birth date {0:?}: expected YYYY-MM-DD or YYYYMMDD")]
    InvalidBirthDate(String),

    #[error("invalid birth time {0:?}: expected HH:MM or HHMM")]
    InvalidBirthTime(String),

    #[error("invalid lunar date {0:?}")]
    InvalidLunarDate(String),

    #[error("day pillar unavailable for {date}: {reason}")]
    DayPillarUnavailable { date: NaiveDate, reason: String },
}

pub type SajuResult<T> = std::result::Result<T, SajuError>;

impl SajuError {
    /// True for errors caused by an external dependency rather than input.
    pub fn is_structural(&self) -> bool {
        matches!(self, SajuError::DayPillarUnavailable { .. })
    }
}
