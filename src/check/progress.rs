//! Progress reporting for the pipeline phases.

use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress notifications from the pipeline.
///
/// The pipeline calls [`begin`](Progress::begin) at the start of each phase,
/// [`update`](Progress::update) after each reference is processed, and
/// [`finish`](Progress::finish) when the phase completes.
pub trait Progress: Send {
    /// Starts a new phase with the given label and total step count.
    fn begin(&mut self, label: &str, total: usize);
    /// Reports that `current` steps of the phase are done.
    fn update(&mut self, current: usize);
    /// Marks the current phase as finished.
    fn finish(&mut self);
}

/// Renders progress as an `indicatif` bar on stderr.
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    /// Creates a console progress reporter with no active phase.
    #[must_use]
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, label: &str, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{msg:<20} [{bar:40}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn update(&mut self, current: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(current as u64);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("active", &self.bar.is_some())
            .finish()
    }
}

/// Discards all progress notifications. Used with `--quiet` and when stderr
/// is not a terminal.
#[derive(Debug, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn begin(&mut self, _label: &str, _total: usize) {}
    fn update(&mut self, _current: usize) {}
    fn finish(&mut self) {}
}
