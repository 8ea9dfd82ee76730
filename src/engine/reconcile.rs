// src/engine/reconcile.rs
//! One step of the tracker: explain the change between two consecutive
//! snapshots with the training declared on the earlier one, check that the
//! explanation matches the observed rating change, and feed the result to
//! the interval tracker.

use super::error::EngineError;
use super::interval::SpareSkills;
use super::tier::{estimate_facility_tier, TierEstimate};
use super::types::{Anomaly, FacilityTier, Observation, Talent};
use super::yields::TrainingYield;
use crate::config::options::EngineOptions;
use crate::core::skills::{Skill, SkillMap};

/// `|true - estimated| <= max(floor, true * tolerance)`, inclusive.
pub fn passes_consistency(opts: &EngineOptions, true_increase: i32, estimated_increase: i32) -> bool {
    let diff = (true_increase - estimated_increase).abs() as f64;
    diff <= opts.tolerance_window(true_increase)
}

/// Best known absolute fine-grained value per skill: band start + known sub-level.
pub fn fine_values(obs: &Observation, spare: &SpareSkills, band_width: i32) -> SkillMap<i32> {
    obs.coarse.zip_with(&spare.mins(), |&band, &sub| band * band_width + sub)
}

/// Everything learned from one pair of snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    /// Elapsed periods between the two snapshots.
    pub dt: i64,
    pub band_deltas: SkillMap<i32>,
    /// Gains predicted by the yield table.
    pub predicted: SkillMap<i32>,
    /// Gains handed to the interval tracker: floored at zero, all zero when the
    /// check failed.
    pub applied: SkillMap<i32>,
    pub estimated_increase: i32,
    pub true_increase: i32,
    pub passed: bool,
    pub inferred_tier: Option<TierEstimate>,
    pub anomalies: Vec<Anomaly>,
}

pub struct Reconciler<'a> {
    yields: &'a dyn TrainingYield,
    opts: &'a EngineOptions,
}

impl<'a> Reconciler<'a> {
    pub fn new(yields: &'a dyn TrainingYield, opts: &'a EngineOptions) -> Self {
        Self { yields, opts }
    }

    /// Reconcile `prev` → `cur` and update `spare`.
    ///
    /// Never fails on data: gaps, disagreeing ratings and odd band moves are
    /// reported as anomalies. Only a yield table without a usable row is an
    /// error.
    pub fn reconcile(
        &self,
        prev: &Observation,
        cur: &Observation,
        talent: &Talent,
        tier: FacilityTier,
        spare: &mut SpareSkills,
    ) -> Result<Reconciliation, EngineError> {
        let opts = self.opts;
        let mut anomalies = Vec::new();

        // 1) elapsed time
        let dt = cur.date.periods_since(prev.date, opts.weeks_per_season);
        if dt > 1 {
            let missing = (dt - 1) as u32;
            logw!("Player {}: missing {} observation(s) prior to {}", cur.entity_id, missing, cur.date);
            anomalies.push(Anomaly::MissingObservations(missing));
        }
        let expected_age = prev.age.advanced(dt, opts.weeks_per_season);
        if expected_age != cur.age {
            logw!("Player {}: age {} at {}, expected {}", cur.entity_id, cur.age, cur.date, expected_age);
            anomalies.push(Anomaly::AgeMismatch { expected: expected_age, actual: cur.age });
        }

        // 2) visible band moves; drops are passed through untouched
        let band_deltas = cur.coarse.zip_with(&prev.coarse, |&c, &p| c - p);
        for (skill, &delta) in band_deltas.iter() {
            if delta < 0 {
                logw!("Player {}: {} band dropped by {} at {}", cur.entity_id, skill.name(), -delta, cur.date);
                anomalies.push(Anomaly::NegativeBandDelta { skill: skill.name(), delta });
            }
        }
        let crossed = band_deltas.map(|_, &d| d > 0);

        // 3) what the earlier snapshot's training should have produced
        let fine = fine_values(prev, spare, opts.band_width);
        let activity = prev.activity;
        let age = cur.age.year;
        let predicted = self.yields.expected_gains(activity, age, tier, talent, &fine, opts)?;
        for (skill, &gain) in predicted.iter() {
            if gain < 0 {
                logw!("Player {}: {} yield {} at {} floored to 0", cur.entity_id, skill.name(), gain, cur.date);
                anomalies.push(Anomaly::NegativeYield { skill: skill.name(), gain });
            }
        }

        // 4) compare with the visible rating
        let estimated_increase = predicted.total() as i32;
        let true_increase = cur.rating - prev.rating;
        let inferred_tier = if activity.trains() {
            estimate_facility_tier(self.yields, true_increase, activity, age, talent, &fine, opts)
        } else {
            None
        };

        // 5) a failed check means we can't say which skills gained
        let passed = passes_consistency(opts, true_increase, estimated_increase);
        let applied = if passed {
            predicted.map(|_, &g| g.max(0))
        } else {
            logw!(
                "Player {}: rating +{} vs estimated +{} ({}) at {}; attribution dropped",
                cur.entity_id, true_increase, estimated_increase, activity, cur.date
            );
            anomalies.push(Anomaly::ConsistencyFailed { estimated: estimated_increase, actual: true_increase });
            SkillMap::splat(0)
        };

        // 6) narrow
        for skill in Skill::ALL {
            spare.update(skill, applied[skill], crossed[skill]);
        }

        Ok(Reconciliation {
            dt,
            band_deltas,
            predicted,
            applied,
            estimated_increase,
            true_increase,
            passed,
            inferred_tier,
            anomalies,
        })
    }
}
