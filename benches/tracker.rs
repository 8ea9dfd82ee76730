// benches/tracker.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use skill_tracker::{
    config::options::EngineOptions,
    core::{Age, SeasonWeek, Skill, SkillMap},
    engine::{types::Profile, Activity, EntityTracker, FacilityTier, Observation, YieldTable},
    skills,
};

const WEEKS: u32 = 200;
const WPS: u32 = 15;

fn synthetic_yields() -> YieldTable {
    let mut t = YieldTable::new();
    for age in 16..40 {
        t.insert(FacilityTier::Reasonable, "None", Activity::AllRounder, age, skills![35, 30, 5, 20, 15, 25, 10]);
        t.insert(FacilityTier::Reasonable, "None", Activity::Fielding, age, skills![0, 0, 0, 60, 10, 0, 0]);
    }
    t
}

/// A player alternating two activities whose visible state follows the
/// table exactly, with a missing week every 17th week.
fn synthetic_history(yields: &YieldTable) -> Vec<Observation> {
    use skill_tracker::engine::TrainingYield;

    let opts = EngineOptions::default();
    let mut fine: SkillMap<i32> = skills![3_400; all];
    let mut date = SeasonWeek::new(30, 0);
    let mut age = Age::new(16, 0);
    let mut out = Vec::new();

    for w in 0..WEEKS {
        let activity = if w % 3 == 0 { Activity::Fielding } else { Activity::AllRounder };
        if w % 17 != 16 {
            out.push(Observation {
                entity_id: 1,
                date,
                age,
                coarse: fine.map(|_, v| v / opts.band_width),
                rating: fine.total() as i32,
                activity,
                timestamp: None,
                profile: Profile::default(),
            });
        }
        date = date.next(WPS);
        age = age.advanced(1, WPS);
        let gains = yields
            .base_gains(activity, age.year, FacilityTier::Reasonable, &Default::default())
            .unwrap_or(SkillMap::splat(0));
        for s in Skill::ALL {
            fine[s] += gains[s];
        }
    }
    out
}

fn bench_tracker(c: &mut Criterion) {
    let yields = synthetic_yields();
    let history = synthetic_history(&yields);
    let opts = EngineOptions::default();

    c.bench_function("track_200_weeks", |b| {
        b.iter(|| {
            let t = EntityTracker::from_history(1, FacilityTier::Reasonable, black_box(&history), &yields, &opts)
                .unwrap();
            black_box(t.estimates().map(|e| e.total_unknown_spare))
        })
    });

    c.bench_function("track_200_weeks_adaptive", |b| {
        let opts = EngineOptions { adapt_tier: true, ..opts };
        b.iter(|| {
            let t = EntityTracker::from_history(1, FacilityTier::Reasonable, black_box(&history), &yields, &opts)
                .unwrap();
            black_box(t.tier())
        })
    });
}

criterion_group!(benches, bench_tracker);
criterion_main!(benches);
