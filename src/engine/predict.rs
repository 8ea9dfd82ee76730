// src/engine/predict.rs
//! Forward projection of a tracked player under a planned training regime.

use super::error::EngineError;
use super::tracker::EntityTracker;
use super::types::Activity;
use super::yields::TrainingYield;
use crate::core::calendar::Age;
use crate::core::skills::{Skill, SkillMap};

/// Projected state after one planned week.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedWeek {
    pub age: Age,
    pub activity: Activity,
    /// Absolute fine-grained value per skill.
    pub values: SkillMap<f64>,
    /// Skills whose band index went up this week.
    pub crossings: Vec<Skill>,
}

/// Projection starting point plus one entry per planned week.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub start_age: Age,
    pub start: SkillMap<f64>,
    pub weeks: Vec<ProjectedWeek>,
}

impl Projection {
    pub fn final_values(&self) -> &SkillMap<f64> {
        self.weeks.last().map(|w| &w.values).unwrap_or(&self.start)
    }
}

/// Project `tracker` through `regime`, one activity per week.
///
/// Sub-levels start at the middle of each skill's current interval; weekly
/// gains come from the yield table at the age reached that week, with the
/// tracker's current tier and training talent.
pub fn project(
    tracker: &EntityTracker,
    regime: &[Activity],
    yields: &dyn TrainingYield,
) -> Result<Projection, EngineError> {
    let (Some(last), Some(attributes)) = (tracker.last_observation(), tracker.attributes()) else {
        return Err(EngineError::InvalidState { state: tracker.state(), action: "project" });
    };
    let opts = tracker.options();
    let bw = opts.band_width;
    let wps = opts.weeks_per_season;

    let start = last.coarse.zip_with(tracker.spare_skills().intervals(), |&band, iv| {
        (band * bw) as f64 + iv.midpoint()
    });

    let mut weeks = Vec::with_capacity(regime.len());
    let mut values = start;
    let mut age = last.age;
    for &activity in regime {
        age = age.advanced(1, wps);
        let fine = values.map(|_, &v| v as i32);
        let gains = yields.expected_gains(activity, age.year, tracker.tier(), &attributes.training_talent, &fine, opts)?;
        let next = values.zip_with(&gains, |&v, &g| v + g as f64);

        let crossings = Skill::ALL
            .into_iter()
            .filter(|&s| (next[s] / bw as f64).floor() > (values[s] / bw as f64).floor())
            .collect();

        weeks.push(ProjectedWeek { age, activity, values: next, crossings });
        values = next;
    }

    Ok(Projection { start_age: last.age, start, weeks })
}
