// src/engine/yields.rs
//! Training yield table: expected fine-grained gain per skill for one week
//! of an activity, keyed by academy tier, training talent and age.
//!
//! Rows are keyed the way the source CSV keys them, by concatenating the
//! labels: `ID = <tier><talent><activity>`, e.g. `reasonableNoneFielding`.
//! Columns are `<age><Abbr>`, e.g. `16Field`.

use std::collections::{BTreeMap, HashMap};
use std::error::Error;

use super::error::EngineError;
use super::types::{Activity, FacilityTier, Talent};
use crate::config::options::EngineOptions;
use crate::core::sanitize::{is_blank, parse_int_cell};
use crate::core::skills::{Skill, SkillMap};
use crate::store::DataSet;

pub fn yield_key(tier: FacilityTier, talent: &str, activity: Activity) -> String {
    format!("{}{}{}", tier.label(), talent, activity.label())
}

/// Outcome of reading one (row, age) cell group.
#[derive(Clone, Debug, PartialEq)]
pub enum RowLookup {
    Gains(SkillMap<i32>),
    MissingRow,
    MissingAge,
}

/// Read-only oracle of weekly training gains.
pub trait TrainingYield: Sync {
    fn lookup(&self, key: &str, age: u32) -> RowLookup;

    /// Table gains with the talent-agnostic fallback; no taper applied.
    /// Rest and Hidden weeks gain nothing and never touch the table.
    fn base_gains(
        &self,
        activity: Activity,
        age: u32,
        tier: FacilityTier,
        talent: &Talent,
    ) -> Result<SkillMap<i32>, EngineError> {
        if !activity.trains() {
            return Ok(SkillMap::splat(0));
        }
        let key = yield_key(tier, talent.label(), activity);
        match self.lookup(&key, age) {
            RowLookup::Gains(g) => return Ok(g),
            RowLookup::MissingAge => return Err(EngineError::MissingYieldAge { key, age }),
            RowLookup::MissingRow if talent.is_none() => {
                return Err(EngineError::MissingYieldRow { key });
            }
            RowLookup::MissingRow => {}
        }

        let fallback = yield_key(tier, Talent::NONE_LABEL, activity);
        logd!("Yields: no row '{key}', falling back to '{fallback}'");
        match self.lookup(&fallback, age) {
            RowLookup::Gains(g) => Ok(g),
            RowLookup::MissingAge => Err(EngineError::MissingYieldAge { key: fallback, age }),
            RowLookup::MissingRow => Err(EngineError::MissingYieldRow { key }),
        }
    }

    /// Gains for one week starting from `fine` (absolute fine-grained values).
    /// Skills already at or past the taper threshold earn at a reduced rate.
    fn expected_gains(
        &self,
        activity: Activity,
        age: u32,
        tier: FacilityTier,
        talent: &Talent,
        fine: &SkillMap<i32>,
        opts: &EngineOptions,
    ) -> Result<SkillMap<i32>, EngineError> {
        let base = self.base_gains(activity, age, tier, talent)?;
        Ok(base.zip_with(fine, |&gain, &value| {
            if value >= opts.taper_threshold {
                (gain as f64 * opts.taper_multiplier) as i32
            } else {
                gain
            }
        }))
    }
}

/// In-memory table, usually loaded from the training CSV.
#[derive(Clone, Debug, Default)]
pub struct YieldTable {
    rows: HashMap<String, BTreeMap<u32, SkillMap<i32>>>,
}

impl YieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn insert(
        &mut self,
        tier: FacilityTier,
        talent: &str,
        activity: Activity,
        age: u32,
        gains: SkillMap<i32>,
    ) {
        self.insert_raw(yield_key(tier, talent, activity), age, gains);
    }

    fn insert_raw(&mut self, key: String, age: u32, gains: SkillMap<i32>) {
        self.rows.entry(key).or_default().insert(age, gains);
    }

    /// Build from a dataset with an `ID` column and `<age><Abbr>` columns.
    /// Blank cells count as zero.
    pub fn from_dataset(ds: &DataSet) -> Result<Self, Box<dyn Error>> {
        let headers = ds.headers.as_ref().ok_or("yield table has no header row")?;
        let id_col = ds.column("ID").ok_or("yield table has no ID column")?;

        // (column, age, skill) for every recognised "<age><Abbr>" header
        let mut cols: Vec<(usize, u32, Skill)> = Vec::new();
        for (i, h) in headers.iter().enumerate() {
            if i == id_col { continue; }
            let h = h.trim();
            let digits = h.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 { continue; }
            let Ok(age) = h[..digits].parse::<u32>() else { continue };
            match Skill::parse(&h[digits..]) {
                Some(skill) => cols.push((i, age, skill)),
                None => logd!("Yields: ignoring column '{h}'"),
            }
        }
        if cols.is_empty() {
            return Err("yield table has no <age><skill> columns".into());
        }

        let mut table = YieldTable::new();
        for (r, row) in ds.rows.iter().enumerate() {
            let Some(id) = row.get(id_col).map(|s| s.trim()).filter(|s| !s.is_empty()) else { continue };
            let mut by_age: BTreeMap<u32, SkillMap<i32>> = BTreeMap::new();
            for &(c, age, skill) in &cols {
                let cell = row.get(c).map(String::as_str).unwrap_or("");
                let gain = if is_blank(cell) {
                    0
                } else {
                    parse_int_cell(cell)
                        .and_then(|v| i32::try_from(v).ok())
                        .ok_or_else(|| format!("yield table row {} ('{}'): bad number '{}'", r + 1, id, cell))?
                };
                by_age.entry(age).or_default()[skill] = gain;
            }
            for (age, gains) in by_age {
                table.insert_raw(id.to_string(), age, gains);
            }
        }
        logd!("Yields: parsed {} rows", table.len());
        Ok(table)
    }
}

impl TrainingYield for YieldTable {
    fn lookup(&self, key: &str, age: u32) -> RowLookup {
        match self.rows.get(key) {
            None => RowLookup::MissingRow,
            Some(ages) => match ages.get(&age) {
                Some(g) => RowLookup::Gains(*g),
                None => RowLookup::MissingAge,
            },
        }
    }
}
