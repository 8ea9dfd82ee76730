// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::{self, consts::CONFIG_FILE, options::{AppOptions, EntitySelector, ExportFormat}};
use crate::csv::to_export_string;
use crate::engine::{predict, Activity, FacilityTier};
use crate::file::resolve_out_dir;
use crate::progress::StderrProgress;
use crate::report;
use crate::runner;
use crate::source::ArchiveSource;

/// Parsed command line: effective options plus one-shot actions.
#[derive(Clone, Debug, PartialEq)]
pub struct CliArgs {
    pub app: AppOptions,
    pub config_path: PathBuf,
    pub list_players: bool,
    pub summary: bool,
    pub project: Option<(Activity, u32)>,
    pub save_config: bool,
    pub log_file: Option<PathBuf>,
    pub help: bool,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }
    let app = &args.app;

    if args.save_config {
        config::file::save(&args.config_path, app)?;
        eprintln!("Saved {}", args.config_path.display());
        return Ok(());
    }

    let source = ArchiveSource::open(&app.select.archive)?;

    if args.list_players {
        for (id, name) in source.players() {
            println!("{},{}", id, name);
        }
        return Ok(());
    }

    let yields = runner::load_yields(app)?;
    let mut progress = StderrProgress::default();
    let summary = runner::run_with(app, &source, &yields, Some(&mut progress))?;

    for path in &summary.files_written {
        eprintln!("Wrote {}", path.display());
    }

    if args.summary {
        for t in &summary.batch.trackers {
            println!("{}", report::tracker_summary(t));
        }
    }

    if let Some((activity, weeks)) = args.project {
        let regime = vec![activity; weeks as usize];
        let sep = app.export.format.delim();
        for t in &summary.batch.trackers {
            let projection = predict::project(t, &regime, &yields)?;
            let table = report::projection_table(&projection, app.engine.band_width);
            println!("Player {}: {} x {} from {}", t.entity_id(), weeks, activity, projection.start_age);
            print!("{}", to_export_string(&table.headers, &table.rows, app.export.include_headers, sep));
        }
    }

    if !summary.batch.failures.is_empty() {
        return Err(format!("{} player(s) could not be tracked", summary.batch.failures.len()).into());
    }
    Ok(())
}

/// Read `--log` and `--config` first so every other flag overrides the file.
pub fn parse_args<I>(args: I) -> Result<CliArgs, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let argv: Vec<String> = args.into_iter().collect();

    let log_file = match argv.iter().position(|a| a == "--log") {
        Some(i) => Some(PathBuf::from(argv.get(i + 1).ok_or("Missing value for --log")?)),
        None => None,
    };
    if let Some(path) = &log_file {
        crate::log::set_log_file(path);
    }

    let config_path = match argv.iter().position(|a| a == "--config") {
        Some(i) => PathBuf::from(argv.get(i + 1).ok_or("Missing value for --config")?),
        None => PathBuf::from(CONFIG_FILE),
    };

    let mut out = CliArgs {
        app: config::file::load(&config_path),
        config_path,
        list_players: false,
        summary: false,
        project: None,
        save_config: false,
        log_file,
        help: false,
    };
    let app = &mut out.app;

    let mut args = argv.into_iter();
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--config" => { args.next(); }
            "--archive" => app.select.archive = PathBuf::from(args.next().ok_or("Missing value for --archive")?),
            "--yields" => app.select.yields = PathBuf::from(args.next().ok_or("Missing value for --yields")?),
            "--all" | "-a" => app.select.entities = EntitySelector::All,
            "-p" | "--player" | "--players" => {
                let v = args.next().ok_or("Missing value for --player")?;
                app.select.entities = EntitySelector::Ids(parse_ids_list(&v)?);}
            "--tier" => {
                let v = args.next().ok_or("Missing value for --tier")?;
                app.select.tier = FacilityTier::parse(&v)
                    .ok_or_else(|| format!("Unknown tier: {}", v))?;}
            "--adapt-tier" => app.engine.adapt_tier = true,
            "--workers" => app.select.workers = args.next().ok_or("Missing value for --workers")?.parse()?,
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing output path")?;
                app.export.out_dir = resolve_out_dir(&v, &app.export.out_dir);}
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                app.export.format = ExportFormat::parse(&v)
                    .ok_or_else(|| format!("Unknown format: {}", v))?;}
            "--include-headers" => app.export.include_headers = true,
            "--no-headers" => app.export.include_headers = false,
            "--ledger" => app.export.ledger = true,
            "--summary" => out.summary = true,
            "--project" => {
                let act = args.next().ok_or("Missing activity for --project")?;
                let weeks: u32 = args.next().ok_or("Missing week count for --project")?.parse()?;
                let activity = Activity::parse(&act);
                if activity == Activity::Hidden {
                    return Err(format!("Unknown activity: {}", act).into());
                }
                out.project = Some((activity, weeks));}
            "--list-players" => out.list_players = true,
            "--save-config" => out.save_config = true,
            "--log" => { args.next(); }
            "-h" | "--help" => out.help = true,
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(out)
}

/// "1,4,10-12" → [1, 4, 10, 11, 12]
pub fn parse_ids_list(s: &str) -> Result<Vec<u64>, Box<dyn Error>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a: u64 = part[..dash].trim().parse()?;
            let b: u64 = part[dash + 1..].trim().parse()?;
            if a > b { return Err(format!("Invalid range: {}", part).into()); }
            out.extend(a..=b);
        } else {
            out.push(part.parse()?);
        }
    }
    out.sort_unstable();
    out.dedup();
    if out.is_empty() {
        return Err("Empty player id list".into());
    }
    Ok(out)
}
