// src/source.rs
//! Where snapshots come from. The engine never reads anything itself; callers
//! hand it the histories a `DataSource` returns.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::Path;

use crate::core::calendar::{Age, SeasonWeek};
use crate::core::levels::parse_band;
use crate::core::sanitize::{is_blank, normalize_ws, parse_int_cell};
use crate::core::skills::{Skill, SkillMap};
use crate::engine::types::{Activity, Observation, Profile};
use crate::store::{self, DataSet};

/// Supplier of per-player snapshot histories.
pub trait DataSource: Sync {
    /// All snapshots of one player, oldest first.
    fn fetch_observations(&self, entity_id: u64) -> Result<Vec<Observation>, Box<dyn Error>>;

    /// Every player the source knows, ascending.
    fn entity_ids(&self) -> Result<Vec<u64>, Box<dyn Error>>;
}

/// Column positions resolved once per archive.
#[derive(Clone, Debug)]
struct Columns {
    id: usize,
    season: usize,
    week: usize,
    age_year: usize,
    age_weeks: usize,
    rating: usize,
    training: usize,
    skills: SkillMap<usize>,
    timestamp: Option<usize>,
}

/// One row per (player, week) archive, e.g. the CSV dump of the scraper's
/// database.
#[derive(Clone, Debug)]
pub struct ArchiveSource {
    ds: DataSet,
    cols: Columns,
}

impl ArchiveSource {
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let ds = store::load_dataset(path)?;
        Self::from_dataset(ds)
    }

    pub fn from_dataset(ds: DataSet) -> Result<Self, Box<dyn Error>> {
        let col = |name: &str| ds.column(name).ok_or_else(|| format!("archive is missing column '{}'", name));

        let id = col("PlayerID")?;
        let season = col("DataSeason")?;
        let week = col("DataWeek")?;
        let age_year = col("AgeYear")?;
        let age_weeks = col("AgeWeeks")?;
        let rating = col("Rating")?;
        let training = col("Training")?;

        let mut skills = SkillMap::splat(0usize);
        for skill in Skill::ALL {
            skills[skill] = ds.column(skill.name())
                .or_else(|| ds.column(skill.abbr()))
                .or_else(|| (skill == Skill::Power).then(|| ds.column("Pow")).flatten())
                .ok_or_else(|| format!("archive is missing skill column '{}'", skill.name()))?;
        }

        let cols = Columns {
            id, season, week, age_year, age_weeks, rating, training, skills,
            timestamp: ds.column("DataTimestamp"),
        };
        Ok(Self { ds, cols })
    }

    pub fn dataset(&self) -> &DataSet {
        &self.ds
    }

    /// (id, name) of every player, ascending by id; the name is taken from
    /// the player's first row carrying one.
    pub fn players(&self) -> Vec<(u64, String)> {
        let mut out: BTreeMap<u64, String> = BTreeMap::new();
        for row in &self.ds.rows {
            let Some(id) = self.entity_of(row) else { continue };
            let name = normalize_ws(self.ds.cell(row, "Player"));
            let slot = out.entry(id).or_default();
            if slot.is_empty() {
                *slot = name;
            }
        }
        out.into_iter().collect()
    }

    fn entity_of(&self, row: &[String]) -> Option<u64> {
        row.get(self.cols.id).and_then(|s| parse_int_cell(s)).and_then(|v| u64::try_from(v).ok())
    }

    fn parse_row(&self, row_no: usize, row: &[String]) -> Result<Observation, Box<dyn Error>> {
        let c = &self.cols;
        let text = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");
        let int = |i: usize, what: &str| -> Result<i64, String> {
            parse_int_cell(text(i)).ok_or_else(|| format!("row {}: bad {} '{}'", row_no, what, text(i)))
        };
        let uint = |i: usize, what: &str| -> Result<u32, String> {
            u32::try_from(int(i, what)?).map_err(|_| format!("row {}: negative {}", row_no, what))
        };

        let entity_id = self.entity_of(row).ok_or_else(|| format!("row {}: bad PlayerID '{}'", row_no, text(c.id)))?;

        let mut coarse = SkillMap::splat(0);
        for skill in Skill::ALL {
            let cell = text(c.skills[skill]);
            coarse[skill] = parse_band(cell)
                .ok_or_else(|| format!("row {}: bad {} band '{}'", row_no, skill.name(), cell))?;
        }

        let rating = i32::try_from(int(c.rating, "Rating")?)
            .map_err(|_| format!("row {}: Rating out of range", row_no))?;

        let timestamp = c.timestamp
            .map(text)
            .filter(|s| !is_blank(s))
            .and_then(parse_int_cell);

        Ok(Observation {
            entity_id,
            date: SeasonWeek::new(uint(c.season, "DataSeason")?, uint(c.week, "DataWeek")?),
            age: Age::new(uint(c.age_year, "AgeYear")?, uint(c.age_weeks, "AgeWeeks")?),
            coarse,
            rating,
            activity: Activity::parse(text(c.training)),
            timestamp,
            profile: Profile {
                name: normalize_ws(self.ds.cell(row, "Player")),
                bat_hand: s!(self.ds.cell(row, "BatHand")),
                bowl_type: s!(self.ds.cell(row, "BowlType")),
                talent1: s!(self.ds.cell(row, "Talent1")),
                talent2: s!(self.ds.cell(row, "Talent2")),
            },
        })
    }
}

impl DataSource for ArchiveSource {
    fn fetch_observations(&self, entity_id: u64) -> Result<Vec<Observation>, Box<dyn Error>> {
        let mut out = Vec::new();
        for (i, row) in self.ds.rows.iter().enumerate() {
            if self.entity_of(row) != Some(entity_id) { continue; }
            // +2: 1-based, after the header line
            out.push(self.parse_row(i + 2, row)?);
        }

        // collection time when every row has it; calendar order otherwise
        if !out.is_empty() && out.iter().all(|o| o.timestamp.is_some()) {
            out.sort_by_key(|o| o.timestamp);
        } else {
            out.sort_by_key(|o| o.date);
        }
        logd!("Source: player {} has {} snapshots", entity_id, out.len());
        Ok(out)
    }

    fn entity_ids(&self) -> Result<Vec<u64>, Box<dyn Error>> {
        let ids: BTreeSet<u64> = self.ds.rows.iter().filter_map(|r| self.entity_of(r)).collect();
        Ok(ids.into_iter().collect())
    }
}
