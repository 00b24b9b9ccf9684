// src/progress.rs
/// Lightweight progress reporting for the enrichment pass.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of records.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One record enriched. `index` is its position in the listing.
    fn item_done(&mut self, _index: usize, _label: &str) {}

    /// One record degraded to summary-only.
    fn item_failed(&mut self, _index: usize, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress as log lines; what the CLI uses.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logf!("Fetching details for {total} appointments…");
    }

    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }

    fn item_done(&mut self, index: usize, label: &str) {
        self.done += 1;
        logd!("[{}/{}] #{} {label}", self.done + self.failed, self.total, index + 1);
    }

    fn item_failed(&mut self, index: usize, label: &str, reason: &str) {
        self.failed += 1;
        logd!("[{}/{}] #{} {label} failed: {reason}", self.done + self.failed, self.total, index + 1);
    }

    fn finish(&mut self) {
        logf!("Details done: {} enriched, {} summary-only", self.done, self.failed);
    }
}
