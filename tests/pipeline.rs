// tests/pipeline.rs
//
// Archive source → batch runner → export tables.
//
mod common;

use std::error::Error;

use common::{field, obs, one_row, temp_path};
use skill_tracker::config::options::{AppOptions, EngineOptions, EntitySelector, ExportFormat};
use skill_tracker::core::{SeasonWeek, Skill};
use skill_tracker::engine::{Activity, FacilityTier, Observation};
use skill_tracker::progress::Progress;
use skill_tracker::report;
use skill_tracker::runner::{self, track_entities};
use skill_tracker::skills;
use skill_tracker::source::{ArchiveSource, DataSource};
use skill_tracker::store::{self, DataSet};

const ARCHIVE: &str = "\
PlayerID,Player,DataSeason,DataWeek,AgeYear,AgeWeeks,Rating,Batting,Bowling,Keeping,Fielding,Endurance,Technique,Power,Training,BatHand,BowlType,Talent1,Talent2,DataTimestamp
7,Ann  Smith,10,1,16,1,22600,ordinary,ordinary,ordinary,ordinary,ordinary,ordinary,ordinary,Fielding,Right,Medium,None,None,1700000600
7,Ann Smith,10,0,16,0,22560,3,3,3,3,3,3,3,Fielding,Right,Medium,None,None,1700000000
8,Bob Jones,10,0,16,0,21000,3,3,3,3,3,3,3,Rest,Left,Spin,Gifted Fielder,None,
";

fn archive() -> ArchiveSource {
    ArchiveSource::from_dataset(DataSet::from_text(ARCHIVE, ',')).unwrap()
}

#[test]
fn archive_rows_become_sorted_observations() {
    let src = archive();
    assert_eq!(src.entity_ids().unwrap(), vec![7, 8]);

    let h = src.fetch_observations(7).unwrap();
    assert_eq!(h.len(), 2);
    assert_eq!(h[0].date, SeasonWeek::new(10, 0));
    assert_eq!(h[1].coarse, skills![3; all]);
    assert_eq!(h[1].timestamp, Some(1_700_000_600));
    assert_eq!(h[0].activity, Activity::Fielding);
    assert_eq!(h[0].profile.name, "Ann Smith");

    let bob = src.fetch_observations(8).unwrap();
    assert_eq!(bob[0].timestamp, None);
    assert_eq!(bob[0].profile.talent1, "Gifted Fielder");
    assert_eq!(bob[0].activity, Activity::Rest);

    assert!(src.fetch_observations(99).unwrap().is_empty());
    assert_eq!(src.players(), vec![(7, "Ann Smith".to_string()), (8, "Bob Jones".to_string())]);
}

#[test]
fn archive_requires_core_columns() {
    let ds = DataSet::from_text("PlayerID,Player\n1,x\n", ',');
    let err = ArchiveSource::from_dataset(ds).unwrap_err();
    assert!(err.to_string().contains("DataSeason"));
}

#[test]
fn archive_bad_band_is_an_error() {
    let text = ARCHIVE.replace("ordinary,ordinary,Fielding", "ordinary,superhuman,Fielding");
    let src = ArchiveSource::from_dataset(DataSet::from_text(&text, ',')).unwrap();
    let err = src.fetch_observations(7).unwrap_err();
    assert!(err.to_string().contains("superhuman"));
}

#[test]
fn archive_loads_from_tsv_file() {
    let path = temp_path("archive.tsv");
    std::fs::write(&path, ARCHIVE.replace(',', "\t")).unwrap();
    let src = ArchiveSource::open(&path).unwrap();
    assert_eq!(src.dataset().row_count(), 3);
    assert_eq!(src.fetch_observations(8).unwrap().len(), 1);
    let _ = std::fs::remove_file(&path);
}

/// In-memory source; player 66 has a history that can't be reconciled.
struct Memory(Vec<Observation>);

impl DataSource for Memory {
    fn fetch_observations(&self, entity_id: u64) -> Result<Vec<Observation>, Box<dyn Error>> {
        Ok(self.0.iter().filter(|o| o.entity_id == entity_id).cloned().collect())
    }
    fn entity_ids(&self) -> Result<Vec<u64>, Box<dyn Error>> {
        let mut ids: Vec<u64> = self.0.iter().map(|o| o.entity_id).collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}

#[derive(Default)]
struct Counting {
    total: usize,
    done: Vec<u64>,
    failed: Vec<u64>,
    finished: bool,
}

impl Progress for Counting {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, id: u64) { self.done.push(id); }
    fn item_failed(&mut self, id: u64, _reason: &str) { self.failed.push(id); }
    fn finish(&mut self) { self.finished = true; }
}

fn memory() -> Memory {
    let mut v = Vec::new();
    for id in 1..=5u64 {
        v.push(obs(id, (10, 0), (16, 0), skills![3; all], 21_000, Activity::Fielding));
        v.push(obs(id, (10, 1), (16, 1), skills![3; all], 21_040, Activity::Fielding));
    }
    // Batting has no yield row
    v.push(obs(66, (10, 0), (16, 0), skills![3; all], 21_000, Activity::Batting));
    v.push(obs(66, (10, 1), (16, 1), skills![3; all], 21_040, Activity::Batting));
    Memory(v)
}

#[test]
fn batch_tracks_in_parallel_and_isolates_failures() {
    let src = memory();
    let yields = one_row(FacilityTier::Reasonable, Activity::Fielding, 16, field(40));
    let ids = vec![1, 2, 3, 4, 5, 66, 99];
    let mut progress = Counting::default();

    let batch = track_entities(
        &src, &yields, &ids, FacilityTier::Reasonable, &EngineOptions::default(), 3, Some(&mut progress),
    );

    let tracked: Vec<u64> = batch.trackers.iter().map(|t| t.entity_id()).collect();
    assert_eq!(tracked, vec![1, 2, 3, 4, 5]);
    assert_eq!(batch.failures.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![66, 99]);
    assert!(batch.failures[1].1.contains("no observations"));
    for t in &batch.trackers {
        assert_eq!(t.interval(Skill::Fielding), (40, 999));
    }

    assert_eq!(progress.total, 7);
    assert_eq!(progress.done.len(), 5);
    assert_eq!(progress.failed.len(), 2);
    assert!(progress.finished);
}

#[test]
fn run_writes_estimates_and_ledger() {
    let src = memory();
    let yields = one_row(FacilityTier::Reasonable, Activity::Fielding, 16, field(40));
    let out_dir = temp_path("out");

    let mut app = AppOptions::default();
    app.select.entities = EntitySelector::Ids(vec![2, 1]);
    app.export.out_dir = out_dir.clone();
    app.export.format = ExportFormat::Tsv;
    app.export.ledger = true;

    let mut progress = Counting::default();
    let summary = runner::run_with(&app, &src, &yields, Some(&mut progress)).unwrap();
    assert_eq!(summary.files_written, vec![out_dir.join("estimates.tsv"), out_dir.join("ledger.tsv")]);
    assert_eq!(summary.batch.trackers.len(), 2);
    assert_eq!((progress.total, progress.done.len()), (2, 2));
    assert!(progress.finished);

    let est = store::load_dataset(&out_dir.join("estimates.tsv")).unwrap();
    assert_eq!(est.row_count(), 2);
    assert_eq!(est.headers.as_deref(), Some(report::estimate_headers().as_slice()));
    assert_eq!(est.cell(&est.rows[0], "PlayerID"), "1");
    assert_eq!(est.cell(&est.rows[0], "FieldMin"), "40");
    assert_eq!(est.cell(&est.rows[0], "FieldSolved"), "false");

    let ledger = store::load_dataset(&out_dir.join("ledger.tsv")).unwrap();
    assert_eq!(ledger.row_count(), 4);
    assert_eq!(ledger.cell(&ledger.rows[1], "Attributed"), "Fielding");
    assert_eq!(ledger.cell(&ledger.rows[1], "Passed"), "true");

    let _ = std::fs::remove_dir_all(&out_dir);
}

#[test]
fn headerless_export() {
    let src = memory();
    let yields = one_row(FacilityTier::Reasonable, Activity::Fielding, 16, field(40));
    let out_dir = temp_path("bare");

    let mut app = AppOptions::default();
    app.select.entities = EntitySelector::Ids(vec![3]);
    app.export.out_dir = out_dir.clone();
    app.export.include_headers = false;

    runner::run_with(&app, &src, &yields, None).unwrap();
    let text = std::fs::read_to_string(out_dir.join("estimates.csv")).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("3,Player 3,10,1,16y1w,21040,"));

    let _ = std::fs::remove_dir_all(&out_dir);
}

#[test]
fn summary_mentions_bounds() {
    let src = memory();
    let yields = one_row(FacilityTier::Reasonable, Activity::Fielding, 16, field(40));
    let t = runner::track_one(&src, &yields, 1, FacilityTier::Reasonable, &EngineOptions::default()).unwrap();
    let text = report::tracker_summary(&t);
    assert!(text.starts_with("Player 1 Player 1"));
    assert!(text.contains("Fielding: (40, 999)"));
    assert!(text.contains("Total Unknown:"));
}
