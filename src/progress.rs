// src/progress.rs
/// Lightweight progress reporting used by long-running operations (crawl/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start of a phase with the number of items in it.
    fn begin(&mut self, _phase: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit (a category, a film page, a ceremony) finished.
    fn item_done(&mut self, _label: &str) {}

    /// One unit produced nothing; `reason` is for humans.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end of a phase, successful or not.
    fn finish(&mut self) {}
}

/// Collects every call, for tests and summaries.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub phases: Vec<(String, usize)>,
    pub done: Vec<String>,
    pub failed: Vec<String>,
    pub lines: Vec<String>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, phase: &str, total: usize) {
        self.phases.push((s!(phase), total));
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(s!(label));
    }
    fn item_failed(&mut self, label: &str, _reason: &str) {
        self.failed.push(s!(label));
    }
}
