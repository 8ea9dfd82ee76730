// tests/common/mod.rs
//
// Builders shared by the integration tests.
//
#![allow(dead_code)]

use skill_tracker::core::{Age, SeasonWeek, SkillMap};
use skill_tracker::engine::types::Profile;
use skill_tracker::engine::{Activity, FacilityTier, Observation, YieldTable};

pub fn obs(
    id: u64,
    (season, week): (u32, u32),
    (year, age_week): (u32, u32),
    coarse: SkillMap<i32>,
    rating: i32,
    activity: Activity,
) -> Observation {
    Observation {
        entity_id: id,
        date: SeasonWeek::new(season, week),
        age: Age::new(year, age_week),
        coarse,
        rating,
        activity,
        timestamp: None,
        profile: Profile {
            name: format!("Player {id}"),
            bat_hand: "Right".into(),
            bowl_type: "Medium".into(),
            talent1: "None".into(),
            talent2: "None".into(),
        },
    }
}

/// One yield row for `activity` at `age` under the talent-agnostic talent.
pub fn one_row(tier: FacilityTier, activity: Activity, age: u32, gains: SkillMap<i32>) -> YieldTable {
    let mut t = YieldTable::new();
    t.insert(tier, "None", activity, age, gains);
    t
}

/// Field-only gain of `g` per week.
pub fn field(g: i32) -> SkillMap<i32> {
    skill_tracker::skills![0, 0, 0, g, 0, 0, 0]
}

/// Fresh path under the system temp dir.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("skill_tracker_{}_{}_{}", std::process::id(), nanos, name))
}
