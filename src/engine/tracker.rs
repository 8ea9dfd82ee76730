// src/engine/tracker.rs
//! Walks one player's snapshot history in order and turns it into bounded
//! sub-levels, estimates and a week-by-week ledger.
//!
//! ```text
//! Uninitialized ──first obs──▶ Initialized ──next obs──▶ Processing ─┐
//!                                   │                        ▲ next obs│
//!                                   │                        └─────────┘
//!                                   └──────────finalize()──────────▶ Finalized
//! ```
//! A tracker is single-use: once finalized it only answers queries.

use super::error::EngineError;
use super::interval::SpareSkills;
use super::reconcile::{fine_values, Reconciler};
use super::types::{Estimates, FacilityTier, LedgerEntry, Observation, PermanentAttributes};
use super::yields::TrainingYield;
use crate::config::options::EngineOptions;
use crate::core::calendar::Age;
use crate::core::skills::{Skill, SkillMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    Uninitialized,
    Initialized,
    Processing,
    Finalized,
}

#[derive(Clone, Debug)]
pub struct EntityTracker {
    entity_id: u64,
    state: TrackerState,
    opts: EngineOptions,
    initial_tier: FacilityTier,
    tier: FacilityTier,
    attributes: Option<PermanentAttributes>,
    spare: SpareSkills,
    last: Option<Observation>,
    observations: usize,
    ledger: Vec<LedgerEntry>,
    estimates: Option<Estimates>,
}

impl EntityTracker {
    pub fn new(entity_id: u64, tier: FacilityTier, opts: EngineOptions) -> Self {
        Self {
            entity_id,
            state: TrackerState::Uninitialized,
            opts,
            initial_tier: tier,
            tier,
            attributes: None,
            spare: SpareSkills::new(),
            last: None,
            observations: 0,
            ledger: Vec::new(),
            estimates: None,
        }
    }

    /// Track a full, time-ordered history and finalize.
    pub fn from_history(
        entity_id: u64,
        tier: FacilityTier,
        history: &[Observation],
        yields: &dyn TrainingYield,
        opts: &EngineOptions,
    ) -> Result<Self, EngineError> {
        if history.is_empty() {
            return Err(EngineError::NoObservations(entity_id));
        }
        let mut tracker = EntityTracker::new(entity_id, tier, *opts);
        for obs in history {
            tracker.observe(obs, yields)?;
        }
        tracker.finalize()?;
        logd!(
            "Tracker: player {} done, {} observations, {} ledger weeks",
            entity_id, tracker.observations, tracker.ledger.len()
        );
        Ok(tracker)
    }

    /// Feed the next snapshot. The first one seeds the tracker.
    pub fn observe(&mut self, obs: &Observation, yields: &dyn TrainingYield) -> Result<(), EngineError> {
        if obs.entity_id != self.entity_id {
            return Err(EngineError::EntityMismatch { expected: self.entity_id, found: obs.entity_id });
        }
        match self.state {
            TrackerState::Uninitialized => self.initialize(obs, yields)?,
            TrackerState::Initialized | TrackerState::Processing => self.process(obs, yields)?,
            TrackerState::Finalized => {
                return Err(EngineError::InvalidState { state: self.state, action: "observe" });
            }
        }
        self.observations += 1;
        self.last = Some(obs.clone());
        Ok(())
    }

    /// Whether `age` is the youngest recruitable age with no weeks elapsed.
    pub fn is_origin(&self, age: Age) -> bool {
        age == Age::new(self.opts.origin_age_year, self.opts.origin_age_week)
    }

    fn initialize(&mut self, first: &Observation, yields: &dyn TrainingYield) -> Result<(), EngineError> {
        let attributes = PermanentAttributes::from_first(first, &self.opts);
        let mut entry = LedgerEntry::missing(first.date);
        entry.exists = true;
        entry.declared = Some(first.activity);

        if self.is_origin(first.age) {
            // nothing trained before a player's first week
            entry.estimated_delta = Some(0);
        } else {
            // the week before the first snapshot is credited to its own declared training
            let fine = fine_values(first, &self.spare, self.opts.band_width);
            let predicted = yields.expected_gains(
                first.activity,
                first.age.year,
                self.tier,
                &attributes.training_talent,
                &fine,
                &self.opts,
            )?;
            self.spare.update_all(&predicted, &SkillMap::splat(false));
            entry.attributed = Some(first.activity);
            entry.estimated_delta = Some(predicted.total() as i32);
        }

        logd!(
            "Tracker: player {} seeded at {} (age {}, talent {})",
            self.entity_id, first.date, first.age, attributes.training_talent
        );
        self.attributes = Some(attributes);
        self.ledger.push(entry);
        self.state = TrackerState::Initialized;
        Ok(())
    }

    fn process(&mut self, cur: &Observation, yields: &dyn TrainingYield) -> Result<(), EngineError> {
        let (Some(prev), Some(attributes)) = (self.last.as_ref(), self.attributes.as_ref()) else {
            return Err(EngineError::InvalidState { state: self.state, action: "process" });
        };
        let wps = self.opts.weeks_per_season;

        let rec = Reconciler::new(yields, &self.opts).reconcile(
            prev,
            cur,
            &attributes.training_talent,
            self.tier,
            &mut self.spare,
        )?;

        // synthetic entries for the weeks nobody recorded
        let mut date = prev.date.next(wps);
        while date.ordinal(wps) < cur.date.ordinal(wps) {
            self.ledger.push(LedgerEntry::missing(date));
            date = date.next(wps);
        }

        let attributed = prev.activity;
        if let Some(est) = rec.inferred_tier {
            if self.opts.adapt_tier && est.tier != self.tier {
                logd!("Tracker: player {} tier {} -> {} at {}", self.entity_id, self.tier, est.tier, cur.date);
                self.tier = est.tier;
            }
        }

        self.ledger.push(LedgerEntry {
            date: cur.date,
            exists: true,
            declared: Some(cur.activity),
            attributed: Some(attributed),
            estimated_delta: Some(rec.estimated_increase),
            true_delta: Some(rec.true_increase),
            inferred_tier: rec.inferred_tier.map(|e| e.tier),
            passed: Some(rec.passed),
            anomalies: rec.anomalies,
        });
        self.state = TrackerState::Processing;
        Ok(())
    }

    /// Compute the derived outputs once and freeze the tracker.
    pub fn finalize(&mut self) -> Result<&Estimates, EngineError> {
        match self.state {
            TrackerState::Initialized | TrackerState::Processing => {}
            state => return Err(EngineError::InvalidState { state, action: "finalize" }),
        }
        let estimates = self.compute_estimates()?;
        self.state = TrackerState::Finalized;
        Ok(self.estimates.insert(estimates))
    }

    /// Pure function of the accumulated state; safe to call repeatedly.
    pub fn compute_estimates(&self) -> Result<Estimates, EngineError> {
        let last = self.last.as_ref()
            .ok_or(EngineError::InvalidState { state: self.state, action: "estimate" })?;
        let bw = self.opts.band_width;

        let spare_rating = last.rating as i64 - last.banded_rating(bw);
        let known_sublevels = self.spare.mins();
        let total_known = known_sublevels.total();
        let total_unknown_spare = spare_rating - total_known;

        let intervals = self.spare.intervals();
        let solved = intervals.map(|_, iv| iv.is_solved());
        let n_unsolved = solved.values().iter().filter(|s| !**s).count();

        // unsolved skills share the leftover evenly
        let per_unsolved = if n_unsolved > 0 {
            total_unknown_spare as f64 / n_unsolved as f64
        } else {
            0.0
        };
        let estimated_spare = solved.map(|_, &s| if s { 0.0 } else { per_unsolved });
        let estimated_max_training = intervals.map(|_, iv| if iv.is_solved() { iv.width() } else { 0 });
        let known_skills = last.coarse.zip_with(&known_sublevels, |&band, &sub| band * bw + sub);
        let estimated_skills = known_skills.zip_with(&estimated_spare, |&k, &e| k as f64 + e);

        Ok(Estimates {
            spare_rating,
            known_sublevels,
            total_known,
            total_unknown_spare,
            solved,
            n_unsolved,
            estimated_spare,
            estimated_max_training,
            known_skills,
            estimated_skills,
        })
    }

    pub fn entity_id(&self) -> u64 {
        self.entity_id
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn options(&self) -> &EngineOptions {
        &self.opts
    }

    /// Tier the tracker started with.
    pub fn initial_tier(&self) -> FacilityTier {
        self.initial_tier
    }

    /// Tier used for the most recent prediction.
    pub fn tier(&self) -> FacilityTier {
        self.tier
    }

    pub fn attributes(&self) -> Option<&PermanentAttributes> {
        self.attributes.as_ref()
    }

    pub fn spare_skills(&self) -> &SpareSkills {
        &self.spare
    }

    pub fn last_observation(&self) -> Option<&Observation> {
        self.last.as_ref()
    }

    pub fn observation_count(&self) -> usize {
        self.observations
    }

    /// Every week from first to last snapshot, gaps included.
    pub fn observation_ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Set once the tracker is finalized.
    pub fn estimates(&self) -> Option<&Estimates> {
        self.estimates.as_ref()
    }

    pub fn known_skills(&self) -> Option<SkillMap<i32>> {
        self.estimates.as_ref().map(|e| e.known_skills)
    }

    pub fn estimated_spare(&self) -> Option<SkillMap<f64>> {
        self.estimates.as_ref().map(|e| e.estimated_spare)
    }

    pub fn estimate_max_training(&self) -> Option<SkillMap<i32>> {
        self.estimates.as_ref().map(|e| e.estimated_max_training)
    }

    /// Number of weeks in the ledger with no snapshot.
    pub fn missing_weeks(&self) -> usize {
        self.ledger.iter().filter(|e| !e.exists).count()
    }

    /// Current sub-level bound of one skill, for display.
    pub fn interval(&self, skill: Skill) -> (i32, i32) {
        let iv = self.spare.get(skill);
        (iv.min, iv.max)
    }
}
