//! KASI Calendar Provider
//!
//! Adapter for the Korea Astronomy and Space Science Institute lunar/solar
//! information service (음양력 정보). One client serves both the date
//! conversion and the day-pillar lookup.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::calendar::{AuthorityGanzi, CalendarAuthority, LunarDate};
use crate::config::EngineConfig;
use crate::ganji::StemBranch;
use crate::pillars::DaySexagenaryLookup;

const LEAP_MARK: &str = "윤";
const COMMON_MARK: &str = "평";

pub struct KasiClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl KasiClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }

    /// `None` when no service key is configured.
    pub fn from_config(config: &EngineConfig) -> Option<Self> {
        let key = config.kasi_service_key.as_ref()?;
        Some(Self::new(&config.kasi_base_url, key, config.request_timeout()))
    }

    async fn fetch_items(&self, operation: &str, params: &[(&str, String)]) -> Result<Vec<Value>> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), operation);
        debug!("KASI request: {} {:?}", operation, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("ServiceKey", self.service_key.as_str()), ("_type", "json")])
            .send()
            .await
            .with_context(|| format!("Failed to reach KASI {}", operation))?
            .error_for_status()
            .with_context(|| format!("KASI {} returned an error status", operation))?;

        let body: Value = response.json().await.context("KASI response is not JSON")?;
        parse_items(&body)
    }

    async fn lun_cal_info(&self, solar: NaiveDate) -> Result<Value> {
        let params = [
            ("solYear", format!("{:04}", solar.year())),
            ("solMonth", format!("{:02}", solar.month())),
            ("solDay", format!("{:02}", solar.day())),
        ];
        self.fetch_items("getLunCalInfo", &params)
            .await?
            .into_iter()
            .next()
            .context("KASI getLunCalInfo returned no items")
    }
}

/// Pulls `response.body.items.item`, which the service sends as a single
/// object, an array, or an empty string when nothing matched.
pub fn parse_items(body: &Value) -> Result<Vec<Value>> {
    let response = &body["response"];
    if let Some(code) = response["header"]["resultCode"].as_str() {
        if code != "00" {
            let msg = response["header"]["resultMsg"].as_str().unwrap_or("unknown error");
            bail!("KASI result {}: {}", code, msg);
        }
    }
    match &response["body"]["items"]["item"] {
        Value::Array(items) => Ok(items.clone()),
        item @ Value::Object(_) => Ok(vec![item.clone()]),
        _ => bail!("KASI response carries no items"),
    }
}

/// Numeric field sent either as a number or as a zero-padded string.
fn number(item: &Value, key: &str) -> Result<i64> {
    let value = match &item[key] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    value.with_context(|| format!("KASI item missing numeric field {}", key))
}

fn ganzi(item: &Value, key: &str) -> Option<StemBranch> {
    let raw = item[key].as_str()?;
    match raw.parse() {
        Ok(pair) => Some(pair),
        Err(e) => {
            warn!("Ignoring unparsable KASI {}: {}", key, e);
            None
        }
    }
}

fn authority_ganzi(item: &Value) -> AuthorityGanzi {
    AuthorityGanzi {
        year: ganzi(item, "lunSecha"),
        month: ganzi(item, "lunWolgeon"),
        day: ganzi(item, "lunIljin"),
    }
}

fn is_leap(item: &Value) -> bool {
    item["lunLeapmonth"].as_str().map(str::trim) == Some(LEAP_MARK)
}

pub fn lunar_from_item(item: &Value) -> Result<LunarDate> {
    let (year, month, day) = (number(item, "lunYear")?, number(item, "lunMonth")?, number(item, "lunDay")?);
    LunarDate::new(year as i32, month as u32, day as u32, is_leap(item))
        .with_context(|| format!("KASI returned impossible lunar date {}-{}-{}", year, month, day))
}

pub fn solar_from_item(item: &Value) -> Result<NaiveDate> {
    let (year, month, day) = (number(item, "solYear")?, number(item, "solMonth")?, number(item, "solDay")?);
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .with_context(|| format!("KASI returned impossible solar date {}-{}-{}", year, month, day))
}

#[async_trait]
impl CalendarAuthority for KasiClient {
    async fn solar_to_lunar(&self, solar: NaiveDate) -> Result<(LunarDate, AuthorityGanzi)> {
        let item = self.lun_cal_info(solar).await?;
        Ok((lunar_from_item(&item)?, authority_ganzi(&item)))
    }

    async fn lunar_to_solar(&self, lunar: LunarDate) -> Result<(NaiveDate, AuthorityGanzi)> {
        let mark = if lunar.is_leap_month { LEAP_MARK } else { COMMON_MARK };
        let params = [
            ("lunYear", format!("{:04}", lunar.year)),
            ("lunMonth", format!("{:02}", lunar.month)),
            ("lunDay", format!("{:02}", lunar.day)),
            ("leapMonth", mark.to_string()),
        ];
        let items = self.fetch_items("getSolCalInfo", &params).await?;

        // a leap month is answered with both the common and the leap day
        let item = items
            .iter()
            .find(|item| is_leap(item) == lunar.is_leap_month)
            .with_context(|| format!("KASI has no {} month for lunar {}", mark, lunar.iso()))?;
        Ok((solar_from_item(item)?, authority_ganzi(item)))
    }
}

#[async_trait]
impl DaySexagenaryLookup for KasiClient {
    async fn lookup_day_sexagenary(&self, date: NaiveDate) -> Result<StemBranch> {
        let item = self.lun_cal_info(date).await?;
        let raw = item["lunIljin"]
            .as_str()
            .context("KASI item missing lunIljin")?;
        raw.parse()
            .with_context(|| format!("KASI lunIljin {:?} is not a day pillar", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganji::{Branch, Stem};
    use serde_json::json;

    fn sample_item() -> Value {
        json!({
            "lunDay": "21", "lunIljin": "경진(庚辰)", "lunLeapmonth": "평", "lunMonth": "04",
            "lunSecha": "경오(庚午)", "lunWolgeon": "신사(辛巳)", "lunYear": 1990,
            "solDay": "15", "solJd": 2448027, "solMonth": "05", "solYear": 1990
        })
    }

    fn envelope(item: Value) -> Value {
        json!({
            "response": {
                "header": { "resultCode": "00", "resultMsg": "NORMAL SERVICE." },
                "body": { "items": { "item": item }, "totalCount": 1 }
            }
        })
    }

    #[test]
    fn test_parse_single_and_array() {
        assert_eq!(parse_items(&envelope(sample_item())).unwrap().len(), 1);
        let two = json!([sample_item(), sample_item()]);
        assert_eq!(parse_items(&envelope(two)).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_empty_and_error() {
        assert!(parse_items(&envelope(json!(""))).is_err());
        let error = json!({
            "response": { "header": { "resultCode": "30", "resultMsg": "SERVICE KEY IS NOT REGISTERED" } }
        });
        let err = parse_items(&error).unwrap_err();
        assert!(err.to_string().contains("SERVICE KEY"));
    }

    #[test]
    fn test_item_fields() {
        let item = sample_item();
        assert_eq!(lunar_from_item(&item).unwrap(), LunarDate::new(1990, 4, 21, false).unwrap());
        assert_eq!(solar_from_item(&item).unwrap(), NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        let ganzi = authority_ganzi(&item);
        assert_eq!(ganzi.year, Some(StemBranch::new(Stem::Gyeong, Branch::O)));
        assert_eq!(ganzi.month, Some(StemBranch::new(Stem::Sin, Branch::Sa)));
        assert_eq!(ganzi.day, Some(StemBranch::new(Stem::Gyeong, Branch::Jin)));
    }

    #[test]
    fn test_missing_field_is_error() {
        let item = json!({ "lunYear": 1990, "lunMonth": "04" });
        assert!(lunar_from_item(&item).is_err());
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(KasiClient::from_config(&EngineConfig::default()).is_none());
        let config = EngineConfig {
            kasi_service_key: Some("key".into()),
            ..EngineConfig::default()
        };
        assert!(KasiClient::from_config(&config).is_some());
    }
}
