// src/report.rs
//! Flattens finalized trackers into exportable tables and console text.

use crate::core::levels::level_name;
use crate::core::skills::Skill;
use crate::engine::predict::Projection;
use crate::engine::tracker::EntityTracker;
use crate::engine::types::LedgerEntry;
use crate::store::DataSet;

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

pub fn estimate_headers() -> Vec<String> {
    let mut hdr: Vec<String> = [
        "PlayerID", "Player", "DataSeason", "DataWeek", "Age", "Rating",
        "SpareRating", "TotalKnown", "TotalUnknownSpare", "Unsolved", "Tier",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    for skill in Skill::ALL {
        let a = skill.abbr();
        hdr.extend([
            format!("{a}Known"),
            format!("{a}Est"),
            format!("{a}MaxTraining"),
            format!("{a}Solved"),
            format!("{a}Min"),
            format!("{a}Max"),
        ]);
    }
    hdr
}

/// One row per finalized tracker; unfinalized ones are skipped.
pub fn estimates_table(trackers: &[EntityTracker], include_headers: bool) -> DataSet {
    let mut rows = Vec::with_capacity(trackers.len());

    for t in trackers {
        let (Some(est), Some(last)) = (t.estimates(), t.last_observation()) else {
            continue;
        };
        let name = t.attributes().map(|a| a.name.clone()).unwrap_or_default();

        let mut row = vec![
            t.entity_id().to_string(),
            name,
            last.date.season.to_string(),
            last.date.week.to_string(),
            last.age.to_string(),
            last.rating.to_string(),
            est.spare_rating.to_string(),
            est.total_known.to_string(),
            est.total_unknown_spare.to_string(),
            est.n_unsolved.to_string(),
            t.tier().to_string(),
        ];
        for skill in Skill::ALL {
            let (min, max) = t.interval(skill);
            row.extend([
                est.known_skills[skill].to_string(),
                format!("{:.1}", est.estimated_skills[skill]),
                est.estimated_max_training[skill].to_string(),
                est.solved[skill].to_string(),
                min.to_string(),
                max.to_string(),
            ]);
        }
        rows.push(row);
    }

    DataSet::new(include_headers.then(estimate_headers), rows)
}

pub fn ledger_headers() -> Vec<String> {
    [
        "PlayerID", "DataSeason", "DataWeek", "Exists", "Declared", "Attributed",
        "EstimatedDelta", "TrueDelta", "InferredTier", "Passed", "Anomalies",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn ledger_row(entity_id: u64, e: &LedgerEntry) -> Vec<String> {
    let anomalies = e.anomalies.iter().map(|a| a.to_string()).collect::<Vec<_>>().join("; ");
    vec![
        entity_id.to_string(),
        e.date.season.to_string(),
        e.date.week.to_string(),
        e.exists.to_string(),
        opt(e.declared),
        opt(e.attributed),
        opt(e.estimated_delta),
        opt(e.true_delta),
        opt(e.inferred_tier),
        opt(e.passed),
        anomalies,
    ]
}

/// Every ledger slot of every tracker, in tracker then calendar order.
pub fn ledger_table(trackers: &[EntityTracker], include_headers: bool) -> DataSet {
    let rows = trackers
        .iter()
        .flat_map(|t| t.observation_ledger().iter().map(move |e| ledger_row(t.entity_id(), e)))
        .collect();
    DataSet::new(include_headers.then(ledger_headers), rows)
}

pub fn projection_table(p: &Projection, band_width: i32) -> DataSet {
    let mut hdr = vec![s!("Step"), s!("Age"), s!("Activity")];
    hdr.extend(Skill::ALL.iter().map(|s| s.abbr().to_string()));
    hdr.push(s!("Crossings"));

    let rows = p.weeks.iter().enumerate().map(|(i, w)| {
        let mut row = vec![(i + 1).to_string(), w.age.to_string(), w.activity.to_string()];
        row.extend(w.values.values().iter().map(|v| format!("{:.0}", v)));
        row.push(
            w.crossings.iter()
                .map(|s| format!("{}->{}", s.abbr(), (w.values[*s] / band_width as f64).floor() as i32))
                .collect::<Vec<_>>()
                .join(" "),
        );
        row
    }).collect();

    DataSet::new(Some(hdr), rows)
}

/// Multi-line console summary of one tracker.
pub fn tracker_summary(t: &EntityTracker) -> String {
    let mut out = String::new();
    let name = t.attributes().map(|a| a.name.as_str()).unwrap_or("");
    out.push_str(&format!("Player {} {}\n", t.entity_id(), name));

    if let Some(a) = t.attributes() {
        out.push_str(&format!(
            "  talent: {}  born: {}  tier: {} (start {})\n",
            a.training_talent, a.birth_week, t.tier(), t.initial_tier()
        ));
    }
    out.push_str(&format!(
        "  observations: {}  missing weeks: {}\n",
        t.observation_count(), t.missing_weeks()
    ));

    let failed = t.observation_ledger().iter().filter(|e| e.passed == Some(false)).count();
    if failed > 0 {
        out.push_str(&format!("  failed checks: {}\n", failed));
    }

    if let (Some(est), Some(last)) = (t.estimates(), t.last_observation()) {
        out.push_str(&format!(
            "  spare rating: {}  known: {}  unknown: {}  unsolved: {}\n",
            est.spare_rating, est.total_known, est.total_unknown_spare, est.n_unsolved
        ));
        for skill in Skill::ALL {
            let band = last.coarse[skill];
            out.push_str(&format!(
                "  {:<10} {:<12} {:>6} est {:>8.1} max+{}\n",
                skill.name(), level_name(band).unwrap_or("?"), est.known_skills[skill],
                est.estimated_skills[skill], est.estimated_max_training[skill]
            ));
        }
    }
    out.push_str(&t.spare_skills().summary());
    out.push('\n');
    out
}
