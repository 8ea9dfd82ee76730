// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::engine::types::FacilityTier;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub engine: EngineOptions,
    pub select: SelectOptions,
    pub export: ExportOptions,
}

/// Numeric knobs of the inference engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineOptions {
    pub weeks_per_season: u32,
    pub band_width: i32,
    pub fixed_floor: i32,
    pub tolerance: f64,
    pub taper_threshold: i32,
    pub taper_multiplier: f64,
    pub origin_age_year: u32,
    pub origin_age_week: u32,
    /// Replace the tracked facility tier with each period's inferred one.
    pub adapt_tier: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            weeks_per_season: WEEKS_PER_SEASON,
            band_width: BAND_WIDTH,
            fixed_floor: FIXED_FLOOR,
            tolerance: TOLERANCE,
            taper_threshold: TAPER_THRESHOLD,
            taper_multiplier: TAPER_MULTIPLIER,
            origin_age_year: ORIGIN_AGE_YEAR,
            origin_age_week: ORIGIN_AGE_WEEK,
            adapt_tier: false,
        }
    }
}

impl EngineOptions {
    /// Largest absolute rating error still accepted for `true_increase`.
    pub fn tolerance_window(&self, true_increase: i32) -> f64 {
        (self.fixed_floor as f64).max(true_increase as f64 * self.tolerance)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntitySelector {
    All,
    Ids(Vec<u64>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOptions {
    pub archive: PathBuf,
    pub yields: PathBuf,
    pub entities: EntitySelector,
    pub tier: FacilityTier,
    pub workers: usize,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            yields: PathBuf::from(DEFAULT_YIELDS),
            entities: EntitySelector::All,
            tier: FacilityTier::Reasonable,
            workers: WORKERS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
    /// Also write the per-week observation ledger.
    pub ledger: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
            ledger: false,
        }
    }
}

impl ExportOptions {
    /// "<out_dir>/<stem>.<ext>"
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{}.{}", stem, self.format.ext()))
    }
}
