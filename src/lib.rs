//! Saju Four Pillars Engine
//!
//! Turns a birth date, time and calendar system into the four
//! stem-branch pillars (year, month, day, hour) and annotates each one:
//! - Solar/lunar conversion with an approximate offline fallback
//! - Solar-term month boundaries
//! - Ten-stars, hidden stems, twelve stages and twelve auxiliary stars
//! - Optional TTL cache over finished charts

pub mod annotate;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod ganji;
pub mod pillars;
pub mod providers;
pub mod utils;

// Re-exports for convenience
pub use cache::{CachedEngine, PillarCache};
pub use config::EngineConfig;
pub use engine::{BirthInput, CalendarType, FourPillars, SajuEngine};
pub use error::SajuError;
pub use ganji::{Branch, Stem, StemBranch};
