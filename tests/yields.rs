// tests/yields.rs
//
// Yield table loading, talent fallback, taper and tier inference.
//
mod common;

use common::{field, one_row};
use skill_tracker::config::options::EngineOptions;
use skill_tracker::core::Skill;
use skill_tracker::engine::tier::estimate_facility_tier;
use skill_tracker::engine::{Activity, EngineError, FacilityTier, Talent, TrainingYield, YieldTable};
use skill_tracker::skills;
use skill_tracker::store::DataSet;

const CSV: &str = "\
ID,16Bat,16Bowl,16Keep,16Field,16End,16Tech,16Pow,17Field
reasonableNoneFielding,0,0,0,40,5,,0,38
reasonableGifted FielderFielding,0,0,0,60,5,0,0,55
goodNoneBatting,70,0,0,0,0,10,0,
";

#[test]
fn loads_rows_and_ages() {
    let ds = DataSet::from_text(CSV, ',');
    let table = YieldTable::from_dataset(&ds).unwrap();
    assert_eq!(table.len(), 3);

    let g = table
        .base_gains(Activity::Fielding, 16, FacilityTier::Reasonable, &Talent::none())
        .unwrap();
    assert_eq!(g, skills![0, 0, 0, 40, 5, 0, 0]);

    let g17 = table
        .base_gains(Activity::Fielding, 17, FacilityTier::Reasonable, &Talent::none())
        .unwrap();
    assert_eq!(g17[Skill::Fielding], 38);
    assert_eq!(g17[Skill::Endurance], 0);
}

#[test]
fn talent_row_wins_and_falls_back_to_none() {
    let ds = DataSet::from_text(CSV, ',');
    let table = YieldTable::from_dataset(&ds).unwrap();

    let gifted = Talent::new("Gifted Fielder");
    let g = table.base_gains(Activity::Fielding, 16, FacilityTier::Reasonable, &gifted).unwrap();
    assert_eq!(g[Skill::Fielding], 60);

    let prodigy = Talent::new("Prodigy");
    let g = table.base_gains(Activity::Fielding, 16, FacilityTier::Reasonable, &prodigy).unwrap();
    assert_eq!(g[Skill::Fielding], 40);
}

#[test]
fn missing_rows_and_ages_are_errors() {
    let ds = DataSet::from_text(CSV, ',');
    let table = YieldTable::from_dataset(&ds).unwrap();

    let err = table
        .base_gains(Activity::Bowling, 16, FacilityTier::Reasonable, &Talent::none())
        .unwrap_err();
    assert_eq!(err, EngineError::MissingYieldRow { key: "reasonableNoneBowling".into() });

    let err = table
        .base_gains(Activity::Fielding, 30, FacilityTier::Reasonable, &Talent::none())
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingYieldAge { age: 30, .. }));
}

#[test]
fn rest_and_hidden_never_touch_the_table() {
    let table = YieldTable::new();
    for a in [Activity::Rest, Activity::Hidden] {
        let g = table.base_gains(a, 16, FacilityTier::Deluxe, &Talent::none()).unwrap();
        assert_eq!(g, skills![0; all]);
    }
}

#[test]
fn taper_applies_at_threshold_and_truncates() {
    let opts = EngineOptions::default();
    let table = one_row(FacilityTier::Reasonable, Activity::AllRounder, 16, skills![40, 40, 7, 0, 0, 0, 0]);
    let fine = skills![9_999, 10_000, 12_000, 0, 0, 0, 0];

    let g = table
        .expected_gains(Activity::AllRounder, 16, FacilityTier::Reasonable, &Talent::none(), &fine, &opts)
        .unwrap();
    assert_eq!(g[Skill::Batting], 40);
    assert_eq!(g[Skill::Bowling], 34);
    assert_eq!(g[Skill::Keeping], 5);
}

#[test]
fn bad_numbers_are_rejected() {
    let ds = DataSet::from_text("ID,16Field\nreasonableNoneFielding,lots\n", ',');
    assert!(YieldTable::from_dataset(&ds).is_err());

    let ds = DataSet::from_text("ID,Notes\nx,y\n", ',');
    assert!(YieldTable::from_dataset(&ds).is_err());
}

fn tiered() -> YieldTable {
    let mut t = YieldTable::new();
    t.insert(FacilityTier::Basic, "None", Activity::Fielding, 16, field(20));
    t.insert(FacilityTier::Reasonable, "None", Activity::Fielding, 16, field(40));
    t.insert(FacilityTier::Good, "None", Activity::Fielding, 16, field(60));
    t
}

#[test]
fn tier_estimate_picks_closest() {
    let opts = EngineOptions::default();
    let fine = skills![0; all];
    let est = estimate_facility_tier(&tiered(), 55, Activity::Fielding, 16, &Talent::none(), &fine, &opts).unwrap();
    assert_eq!(est.tier, FacilityTier::Good);
    assert_eq!(est.name(), "good");
    assert_eq!((est.predicted_delta, est.error), (60, 5));
}

#[test]
fn tier_estimate_ties_go_to_the_weaker_tier() {
    let opts = EngineOptions::default();
    let fine = skills![0; all];
    let est = estimate_facility_tier(&tiered(), 30, Activity::Fielding, 16, &Talent::none(), &fine, &opts).unwrap();
    assert_eq!(est.tier, FacilityTier::Basic);
}

#[test]
fn tier_estimate_none_without_rows() {
    let opts = EngineOptions::default();
    let fine = skills![0; all];
    let est = estimate_facility_tier(&tiered(), 30, Activity::Batting, 16, &Talent::none(), &fine, &opts);
    assert!(est.is_none());
}
