// src/progress.rs
/// Lightweight progress reporting used by long-running operations (batch tracking/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one entity's history has been tracked.
    fn item_done(&mut self, _entity_id: u64) {}

    /// Called when one entity could not be tracked.
    fn item_failed(&mut self, _entity_id: u64, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one status line per event to stderr.
#[derive(Default)]
pub struct StderrProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, entity_id: u64) {
        self.done += 1;
        eprintln!("Tracked player {} ({}/{})", entity_id, self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, entity_id: u64, reason: &str) {
        self.failed += 1;
        eprintln!("Player {} failed: {} ({}/{})", entity_id, reason, self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        if self.total == 0 {
            eprintln!("Tracking complete");
        } else {
            eprintln!("Tracking complete ({} ok, {} failed)", self.done, self.failed);
        }
    }
}
