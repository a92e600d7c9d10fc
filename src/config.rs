//! Engine Configuration
//!
//! Loaded from the environment (with `.env` support) or from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_KASI_BASE_URL: &str =
    "http://apis.data.go.kr/B090041/openapi/service/LrsrCldInfoService";

/// Where the year pillar turns over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearBoundary {
    /// Civil year, January 1st
    #[default]
    Gregorian,
    /// Nominal onset of 입춘 (February 4th)
    SpringBegins,
}

impl FromStr for YearBoundary {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" => Ok(YearBoundary::Gregorian),
            "spring_begins" | "ipchun" => Ok(YearBoundary::SpringBegins),
            other => anyhow::bail!("unknown year boundary: {}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub kasi_base_url: String,
    pub kasi_service_key: Option<String>,
    pub request_timeout_ms: u64,
    pub cache_ttl_secs: u64,
    pub year_boundary: YearBoundary,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kasi_base_url: DEFAULT_KASI_BASE_URL.to_string(),
            kasi_service_key: None,
            request_timeout_ms: 2_000,
            cache_ttl_secs: 24 * 60 * 60,
            year_boundary: YearBoundary::Gregorian,
        }
    }
}

impl EngineConfig {
    /// Reads `SAJU_*` variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = get("SAJU_KASI_BASE_URL") {
            config.kasi_base_url = url;
        }
        config.kasi_service_key = get("SAJU_KASI_SERVICE_KEY").filter(|k| !k.is_empty());
        if let Some(ms) = get("SAJU_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = ms.parse().context("SAJU_REQUEST_TIMEOUT_MS must be an integer")?;
        }
        if let Some(secs) = get("SAJU_CACHE_TTL_SECS") {
            config.cache_ttl_secs = secs.parse().context("SAJU_CACHE_TTL_SECS must be an integer")?;
        }
        if let Some(boundary) = get("SAJU_YEAR_BOUNDARY") {
            config.year_boundary = boundary.parse()?;
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
        assert_eq!(config.cache_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.year_boundary, YearBoundary::Gregorian);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SAJU_KASI_SERVICE_KEY", "secret"),
            ("SAJU_REQUEST_TIMEOUT_MS", "500"),
            ("SAJU_YEAR_BOUNDARY", "spring_begins"),
        ]);
        let config = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.kasi_service_key.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_ms, 500);
        assert_eq!(config.year_boundary, YearBoundary::SpringBegins);
        assert_eq!(config.kasi_base_url, DEFAULT_KASI_BASE_URL);
    }

    #[test]
    fn test_bad_number_is_error() {
        let result = EngineConfig::from_lookup(|k| (k == "SAJU_CACHE_TTL_SECS").then(|| "soon".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"cache_ttl_secs": 60}}"#).unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.request_timeout_ms, 2_000);
    }
}
