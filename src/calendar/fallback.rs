//! Approximate lunar conversion
//!
//! NOT astronomical. Used only when the calendrical authority cannot answer:
//! the lunar date is taken to trail the solar date by a fixed number of days,
//! and leap months are never detected. Converting there and back is not
//! guaranteed to return the starting date (lunar day 30 and leap flags are
//! lost on the way).

use chrono::{Datelike, Days, NaiveDate};

use super::LunarDate;

/// Days the lunar calendar is assumed to trail the solar one.
pub const LUNAR_OFFSET_DAYS: u64 = 30;

pub fn approximate_lunar(solar: NaiveDate) -> LunarDate {
    let shifted = solar.checked_sub_days(Days::new(LUNAR_OFFSET_DAYS)).unwrap_or(solar);
    LunarDate {
        year: shifted.year(),
        month: shifted.month(),
        day: shifted.day(),
        is_leap_month: false,
    }
}

pub fn approximate_solar(lunar: LunarDate) -> NaiveDate {
    let base = clamped_date(lunar.year, lunar.month, lunar.day);
    base.checked_add_days(Days::new(LUNAR_OFFSET_DAYS)).unwrap_or(base)
}

/// Reads the lunar y/m/d as a Gregorian date, pulling the day back into the
/// month when the lunar day does not exist there (e.g. 2/30).
fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    (1..=day.max(1))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .unwrap_or(NaiveDate::MIN)
}
