// src/runner.rs
use std::error::Error;
use std::path::PathBuf;
use std::sync::{atomic::{AtomicUsize, Ordering}, mpsc};
use std::thread;

use crate::{
    config::options::{AppOptions, EngineOptions, EntitySelector},
    engine::{EntityTracker, FacilityTier, TrainingYield, YieldTable},
    file::write_export,
    progress::Progress,
    report,
    source::{ArchiveSource, DataSource},
    store,
};
use crate::config::consts::{ESTIMATES_STEM, LEDGER_STEM};

/// Outcome of a batch: trackers in ascending player order plus the players
/// that could not be tracked.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub trackers: Vec<EntityTracker>,
    pub failures: Vec<(u64, String)>,
}

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub batch: BatchResult,
    pub files_written: Vec<PathBuf>,
}

pub fn resolve_ids(sel: &EntitySelector, source: &dyn DataSource) -> Result<Vec<u64>, Box<dyn Error>> {
    match sel {
        EntitySelector::All => source.entity_ids(),
        EntitySelector::Ids(v) => {
            let mut ids = v.clone();
            ids.sort_unstable();
            ids.dedup();
            Ok(ids)
        }
    }
}

/// Fetch one player's history and walk it to a finalized tracker.
pub fn track_one(
    source: &dyn DataSource,
    yields: &dyn TrainingYield,
    entity_id: u64,
    tier: FacilityTier,
    opts: &EngineOptions,
) -> Result<EntityTracker, Box<dyn Error>> {
    let history = source.fetch_observations(entity_id)?;
    let tracker = EntityTracker::from_history(entity_id, tier, &history, yields, opts)?;
    Ok(tracker)
}

/// Track `ids` on up to `workers` threads. Each tracker is owned by exactly
/// one worker; a failing player is reported and skipped.
pub fn track_entities(
    source: &dyn DataSource,
    yields: &dyn TrainingYield,
    ids: &[u64],
    tier: FacilityTier,
    opts: &EngineOptions,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> BatchResult {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
    }

    type TrackOk = EntityTracker;
    type TrackErr = (u64, String);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Result<TrackOk, TrackErr>>();
    let workers = workers.min(ids.len()).max(1);

    let mut result = BatchResult::default();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let idx = &counter;
            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let id = ids[i];
                    let r = match track_one(source, yields, id, tier, opts) {
                        Ok(t) => Ok(t),
                        Err(e) => Err((id, e.to_string())),
                    };
                    if tx.send(r).is_err() {
                        break;
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for msg in res_rx {
            match msg {
                Ok(tracker) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(tracker.entity_id());
                    }
                    result.trackers.push(tracker);
                }
                Err((id, reason)) => {
                    loge!("Player {id}: {reason}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(id, &reason);
                    }
                    result.failures.push((id, reason));
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    result.trackers.sort_by_key(|t| t.entity_id());
    result.failures.sort_by_key(|(id, _)| *id);
    result
}

/// Load the yield table named by the options.
pub fn load_yields(app: &AppOptions) -> Result<YieldTable, Box<dyn Error>> {
    let ds = store::load_dataset(&app.select.yields)?;
    let table = YieldTable::from_dataset(&ds)?;
    logf!("Yields: {} rows from {}", table.len(), app.select.yields.display());
    Ok(table)
}

/// Track the selection of `source` with `yields` and write the export tables.
pub fn run_with(
    app: &AppOptions,
    source: &dyn DataSource,
    yields: &dyn TrainingYield,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let ids = resolve_ids(&app.select.entities, source)?;
    if ids.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No player IDs to process.");
        }
        return Ok(RunSummary::default());
    }

    logf!("Run: tracking {} player(s) at tier {}", ids.len(), app.select.tier);
    let batch = track_entities(
        source,
        yields,
        &ids,
        app.select.tier,
        &app.engine,
        app.select.workers,
        progress,
    );

    let export = &app.export;
    let mut files_written = Vec::new();
    if !batch.trackers.is_empty() {
        let est = report::estimates_table(&batch.trackers, true);
        files_written.push(write_export(export, ESTIMATES_STEM, &est)?);
        if export.ledger {
            let ledger = report::ledger_table(&batch.trackers, true);
            files_written.push(write_export(export, LEDGER_STEM, &ledger)?);
        }
    }

    Ok(RunSummary { batch, files_written })
}

/// Full pipeline from the configured archive and yield files.
pub fn run(app: &AppOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, Box<dyn Error>> {
    let source = ArchiveSource::open(&app.select.archive)?;
    let yields = load_yields(app)?;
    run_with(app, &source, &yields, progress)
}
