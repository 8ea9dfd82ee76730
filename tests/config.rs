// tests/config.rs
//
// Config file round trip and command-line overrides.
//
mod common;

use std::path::PathBuf;

use common::temp_path;
use skill_tracker::cli::{parse_args, parse_ids_list};
use skill_tracker::config::file;
use skill_tracker::config::options::{AppOptions, EntitySelector, ExportFormat, ExportOptions};
use skill_tracker::engine::{Activity, FacilityTier};

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parse_reads_known_keys_and_skips_junk() {
    let cfg = file::parse(
        "# tracker settings\n\
         tolerance=0.2\n\
         fixed_floor = 30\n\
         adapt_tier=1\n\
         tier=Good\n\
         players=4, 9 ,x\n\
         format=tsv\n\
         ledger=true\n\
         band_width=wide\n\
         mystery=1\n\
         no equals sign\n",
    );
    assert_eq!(cfg.engine.tolerance, 0.2);
    assert_eq!(cfg.engine.fixed_floor, 30);
    assert!(cfg.engine.adapt_tier);
    assert_eq!(cfg.engine.band_width, 1000);
    assert_eq!(cfg.select.tier, FacilityTier::Good);
    assert_eq!(cfg.select.entities, EntitySelector::Ids(vec![4, 9]));
    assert_eq!(cfg.export.format, ExportFormat::Tsv);
    assert!(cfg.export.ledger);
}

#[test]
fn save_then_load_round_trips() {
    let path = temp_path("tracker.cfg");
    let mut cfg = AppOptions::default();
    cfg.engine.taper_threshold = 12_000;
    cfg.engine.weeks_per_season = 16;
    cfg.select.archive = PathBuf::from("data/other.csv");
    cfg.select.entities = EntitySelector::Ids(vec![1, 2, 3]);
    cfg.select.workers = 2;
    cfg.export.include_headers = false;

    file::save(&path, &cfg).unwrap();
    assert_eq!(file::load(&path), cfg);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_gives_defaults() {
    assert_eq!(file::load(&temp_path("nope.cfg")), AppOptions::default());
}

#[test]
fn export_paths() {
    let mut e = ExportOptions::default();
    e.out_dir = PathBuf::from("results");
    assert_eq!(e.path_for("estimates"), PathBuf::from("results").join("estimates.csv"));
    e.format = ExportFormat::Tsv;
    assert_eq!(e.path_for("ledger"), PathBuf::from("results").join("ledger.tsv"));
    assert_eq!(e.format.delim(), '\t');
}

#[test]
fn flags_override_config_file() {
    let cfg_path = temp_path("flags.cfg");
    std::fs::write(&cfg_path, "tier=basic\nformat=tsv\nplayers=1\n").unwrap();
    let cfg = cfg_path.to_string_lossy().into_owned();

    let a = parse_args(args(&[
        "--config", &cfg, "--tier", "superb", "-p", "3,5-7", "--adapt-tier", "--ledger", "--summary",
        "--project", "batting technique", "4",
    ]))
    .unwrap();
    assert_eq!(a.config_path, cfg_path);
    assert_eq!(a.app.select.tier, FacilityTier::Superb);
    assert_eq!(a.app.select.entities, EntitySelector::Ids(vec![3, 5, 6, 7]));
    assert_eq!(a.app.export.format, ExportFormat::Tsv);
    assert!(a.app.engine.adapt_tier);
    assert!(a.app.export.ledger);
    assert!(a.summary);
    assert_eq!(a.project, Some((Activity::BattingTechnique, 4)));

    let b = parse_args(args(&["--config", &cfg, "--all", "--format", "csv", "-o", "elsewhere"])).unwrap();
    assert_eq!(b.app.select.entities, EntitySelector::All);
    assert_eq!(b.app.export.format, ExportFormat::Csv);
    assert_eq!(b.app.export.out_dir, PathBuf::from("elsewhere"));

    let _ = std::fs::remove_file(&cfg_path);
}

#[test]
fn bad_flags_are_errors() {
    let cfg = temp_path("none.cfg").to_string_lossy().into_owned();
    for bad in [
        vec!["--tier", "palatial"],
        vec!["--format", "xlsx"],
        vec!["--project", "juggling", "3"],
        vec!["--player"],
        vec!["--frobnicate"],
    ] {
        let mut v = vec!["--config", cfg.as_str()];
        v.extend(bad.iter().copied());
        assert!(parse_args(args(&v)).is_err(), "{:?} should fail", bad);
    }
}

#[test]
fn id_lists() {
    assert_eq!(parse_ids_list("5, 1,3-4,3").unwrap(), vec![1, 3, 4, 5]);
    assert!(parse_ids_list("4-2").is_err());
    assert!(parse_ids_list(" , ").is_err());
}
