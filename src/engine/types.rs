// src/engine/types.rs
use std::fmt;

use crate::config::options::EngineOptions;
use crate::core::calendar::{self, Age, SeasonWeek};
use crate::core::sanitize::{is_blank, label_key};
use crate::core::skills::SkillMap;

/// Declared weekly training.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    Batting,
    Bowling,
    Keeping,
    Fielding,
    Fitness,
    BattingTechnique,
    BowlingTechnique,
    Strength,
    KeeperBatsman,
    AllRounder,
    Rest,
    /// Not visible to the observer.
    Hidden,
}

impl Activity {
    pub const ALL: [Activity; 12] = [
        Activity::Batting,
        Activity::Bowling,
        Activity::Keeping,
        Activity::Fielding,
        Activity::Fitness,
        Activity::BattingTechnique,
        Activity::BowlingTechnique,
        Activity::Strength,
        Activity::KeeperBatsman,
        Activity::AllRounder,
        Activity::Rest,
        Activity::Hidden,
    ];

    /// Label as printed by the site and used in yield table IDs.
    pub fn label(self) -> &'static str {
        match self {
            Activity::Batting => "Batting",
            Activity::Bowling => "Bowling",
            Activity::Keeping => "Keeping",
            Activity::Fielding => "Fielding",
            Activity::Fitness => "Fitness",
            Activity::BattingTechnique => "Batting Technique",
            Activity::BowlingTechnique => "Bowling Technique",
            Activity::Strength => "Strength",
            Activity::KeeperBatsman => "Keeper-Batsman",
            Activity::AllRounder => "All-rounder",
            Activity::Rest => "Rest",
            Activity::Hidden => "Hidden",
        }
    }

    /// Unknown or blank labels are `Hidden`.
    pub fn parse(s: &str) -> Activity {
        if is_blank(s) {
            return Activity::Hidden;
        }
        let key = label_key(s);
        Activity::ALL
            .into_iter()
            .find(|a| label_key(a.label()) == key)
            .unwrap_or(Activity::Hidden)
    }

    /// Whether this activity produces a yield-table prediction at all.
    pub fn trains(self) -> bool {
        !matches!(self, Activity::Rest | Activity::Hidden)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Academy level, weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacilityTier {
    None,
    Minimal,
    Basic,
    Modest,
    Reasonable,
    Decent,
    Good,
    Excellent,
    Superb,
    Luxurious,
    Deluxe,
}

impl FacilityTier {
    pub const ALL: [FacilityTier; 11] = [
        FacilityTier::None,
        FacilityTier::Minimal,
        FacilityTier::Basic,
        FacilityTier::Modest,
        FacilityTier::Reasonable,
        FacilityTier::Decent,
        FacilityTier::Good,
        FacilityTier::Excellent,
        FacilityTier::Superb,
        FacilityTier::Luxurious,
        FacilityTier::Deluxe,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            FacilityTier::None => "none",
            FacilityTier::Minimal => "minimal",
            FacilityTier::Basic => "basic",
            FacilityTier::Modest => "modest",
            FacilityTier::Reasonable => "reasonable",
            FacilityTier::Decent => "decent",
            FacilityTier::Good => "good",
            FacilityTier::Excellent => "excellent",
            FacilityTier::Superb => "superb",
            FacilityTier::Luxurious => "luxurious",
            FacilityTier::Deluxe => "deluxe",
        }
    }

    pub fn parse(s: &str) -> Option<FacilityTier> {
        let key = label_key(s);
        FacilityTier::ALL.into_iter().find(|t| t.label() == key)
    }
}

impl fmt::Display for FacilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Training talent as it appears in yield table IDs; "None" when absent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Talent(String);

impl Talent {
    pub const NONE_LABEL: &'static str = "None";

    pub fn none() -> Self {
        Talent(s!(Self::NONE_LABEL))
    }

    pub fn new(label: &str) -> Self {
        if is_blank(label) { Talent::none() } else { Talent(label.trim().to_string()) }
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE_LABEL
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// Only "Prodigy" and the "Gifted …" talents change training yield.
    /// The first talent slot that qualifies wins.
    pub fn from_slots(talent1: &str, talent2: &str) -> Talent {
        [talent1, talent2]
            .into_iter()
            .map(str::trim)
            .find(|t| *t == "Prodigy" || t.contains("Gifted"))
            .map(Talent::new)
            .unwrap_or_else(Talent::none)
    }
}

impl Default for Talent {
    fn default() -> Self {
        Talent::none()
    }
}

impl fmt::Display for Talent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive fields a snapshot carries that never change for a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub bat_hand: String,
    pub bowl_type: String,
    pub talent1: String,
    pub talent2: String,
}

/// One weekly snapshot of one player.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub entity_id: u64,
    pub date: SeasonWeek,
    pub age: Age,
    /// Band index per skill.
    pub coarse: SkillMap<i32>,
    /// Visible "Rating".
    pub rating: i32,
    pub activity: Activity,
    /// Collection time (unix seconds), when the source recorded one.
    pub timestamp: Option<i64>,
    pub profile: Profile,
}

impl Observation {
    /// Σ coarse band * band width.
    pub fn banded_rating(&self, band_width: i32) -> i64 {
        self.coarse.total() * band_width as i64
    }
}

/// Facts fixed for the tracked player's lifetime, taken from the first snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermanentAttributes {
    pub entity_id: u64,
    pub name: String,
    pub bat_hand: String,
    pub bowl_type: String,
    pub talent1: String,
    pub talent2: String,
    pub training_talent: Talent,
    pub birth_week: SeasonWeek,
}

impl PermanentAttributes {
    pub fn from_first(obs: &Observation, opts: &EngineOptions) -> Self {
        let p = &obs.profile;
        Self {
            entity_id: obs.entity_id,
            name: p.name.clone(),
            bat_hand: p.bat_hand.clone(),
            bowl_type: p.bowl_type.clone(),
            talent1: p.talent1.clone(),
            talent2: p.talent2.clone(),
            training_talent: Talent::from_slots(&p.talent1, &p.talent2),
            birth_week: calendar::birth_week(obs.date, obs.age, opts.origin_age_year, opts.weeks_per_season),
        }
    }
}

/// Non-fatal conditions met while walking a history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// `n` weekly snapshots absent before this one.
    MissingObservations(u32),
    /// Predicted and observed rating change disagree beyond tolerance.
    ConsistencyFailed { estimated: i32, actual: i32 },
    /// Age did not advance in step with the calendar.
    AgeMismatch { expected: Age, actual: Age },
    /// A visible band went down.
    NegativeBandDelta { skill: &'static str, delta: i32 },
    /// The yield table predicted a loss; applied as zero.
    NegativeYield { skill: &'static str, gain: i32 },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MissingObservations(n) => write!(f, "missing {n} observation(s)"),
            Anomaly::ConsistencyFailed { estimated, actual } => {
                write!(f, "rating delta {actual} vs estimated {estimated}")
            }
            Anomaly::AgeMismatch { expected, actual } => write!(f, "age {actual}, expected {expected}"),
            Anomaly::NegativeBandDelta { skill, delta } => write!(f, "{skill} band {delta}"),
            Anomaly::NegativeYield { skill, gain } => write!(f, "{skill} yield {gain}"),
        }
    }
}

/// One calendar week between the first and last snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    pub date: SeasonWeek,
    /// A real snapshot exists for this week.
    pub exists: bool,
    /// Activity declared on this week's snapshot.
    pub declared: Option<Activity>,
    /// Activity credited with the gains that led to this snapshot.
    pub attributed: Option<Activity>,
    pub estimated_delta: Option<i32>,
    pub true_delta: Option<i32>,
    pub inferred_tier: Option<FacilityTier>,
    /// Consistency check outcome; `None` where no check could run.
    pub passed: Option<bool>,
    pub anomalies: Vec<Anomaly>,
}

impl LedgerEntry {
    pub fn missing(date: SeasonWeek) -> Self {
        Self {
            date,
            exists: false,
            declared: None,
            attributed: None,
            estimated_delta: None,
            true_delta: None,
            inferred_tier: None,
            passed: None,
            anomalies: Vec::new(),
        }
    }
}

/// Derived per-skill outputs of a finalized tracker.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimates {
    /// Rating left after the banded part: Σ sub-levels plus residual.
    pub spare_rating: i64,
    pub known_sublevels: SkillMap<i32>,
    pub total_known: i64,
    pub total_unknown_spare: i64,
    pub solved: SkillMap<bool>,
    pub n_unsolved: usize,
    pub estimated_spare: SkillMap<f64>,
    pub estimated_max_training: SkillMap<i32>,
    pub known_skills: SkillMap<i32>,
    /// known_skills + estimated_spare
    pub estimated_skills: SkillMap<f64>,
}
