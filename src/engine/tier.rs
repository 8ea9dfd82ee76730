// src/engine/tier.rs
use super::types::{Activity, FacilityTier, Talent};
use super::yields::TrainingYield;
use crate::config::options::EngineOptions;
use crate::core::skills::SkillMap;

/// Best-matching academy tier for one observed rating change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierEstimate {
    pub index: usize,
    pub tier: FacilityTier,
    pub predicted_delta: i32,
    /// |true - predicted|
    pub error: i32,
}

impl TierEstimate {
    pub fn name(&self) -> &'static str {
        self.tier.label()
    }
}

/// Try every tier, weakest first, and keep the one whose summed predicted
/// gain is closest to `true_delta`. The first minimum wins ties.
///
/// Tiers the table has no usable row for are skipped; `None` if none has.
/// A point estimate only, meant to steer later predictions.
pub fn estimate_facility_tier(
    yields: &dyn TrainingYield,
    true_delta: i32,
    activity: Activity,
    age: u32,
    talent: &Talent,
    fine: &SkillMap<i32>,
    opts: &EngineOptions,
) -> Option<TierEstimate> {
    let mut best: Option<TierEstimate> = None;
    for tier in FacilityTier::ALL {
        let gains = match yields.expected_gains(activity, age, tier, talent, fine, opts) {
            Ok(g) => g,
            Err(_) => continue,
        };
        let predicted_delta = gains.total() as i32;
        let error = (true_delta - predicted_delta).abs();
        if best.is_none_or(|b| error < b.error) {
            best = Some(TierEstimate { index: tier.index(), tier, predicted_delta, error });
        }
    }
    best
}
