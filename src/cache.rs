//! Chart Cache
//!
//! Memoizes finished charts by normalized birth input for a fixed TTL.
//! The clock is injectable so expiry can be tested without sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::engine::{BirthInput, FourPillars, ParsedBirth, SajuEngine};
use crate::error::SajuResult;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Mutex::new(Instant::now()) }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.lock().map(|now| *now).unwrap_or_else(|e| *e.into_inner())
    }
}

struct Entry {
    chart: FourPillars,
    stored_at: Instant,
}

pub struct PillarCache {
    entries: RwLock<HashMap<ParsedBirth, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl PillarCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        self.clock.now().saturating_duration_since(entry.stored_at) < self.ttl
    }

    pub async fn get(&self, key: &ParsedBirth) -> Option<FourPillars> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if self.is_fresh(entry) => return Some(entry.chart.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // expired: evict under the write lock, rechecking in case of a racing insert
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !self.is_fresh(entry)) {
            entries.remove(key);
        }
        None
    }

    pub async fn insert(&self, key: ParsedBirth, chart: FourPillars) {
        let stored_at = self.clock.now();
        self.entries.write().await.insert(key, Entry { chart, stored_at });
    }

    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Engine wrapped with a chart cache. Failures are never cached.
pub struct CachedEngine {
    inner: Arc<SajuEngine>,
    cache: Arc<PillarCache>,
}

impl CachedEngine {
    pub fn new(inner: Arc<SajuEngine>, cache: Arc<PillarCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &PillarCache {
        &self.cache
    }

    pub async fn compute_four_pillars(&self, input: &BirthInput) -> SajuResult<FourPillars> {
        let key = input.parse()?;
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Chart cache hit for {:?}", key);
            return Ok(cached);
        }

        let chart = self.inner.compute_parsed(&key).await?;
        self.cache.insert(key, chart.clone()).await;
        Ok(chart)
    }
}
