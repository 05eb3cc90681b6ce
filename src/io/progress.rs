//! Progress display for batch patch generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Patches: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many patches of a batch have been written or skipped
pub struct ProgressManager {
    bar: ProgressBar,
    written: usize,
    skipped: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with an empty bar
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
            written: 0,
            skipped: 0,
        }
    }

    /// Create a progress manager that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            written: 0,
            skipped: 0,
        }
    }

    /// Size the bar for the number of patches in the batch
    pub fn initialize(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_style(BATCH_STYLE.clone());
        self.bar.enable_steady_tick(Duration::from_millis(200));
        self.written = 0;
        self.skipped = 0;
    }

    /// Record a written patch
    pub fn complete_patch(&mut self, name: &str) {
        self.written += 1;
        self.bar.set_message(name.to_string());
        self.bar.inc(1);
    }

    /// Record a patch whose output already existed
    pub fn skip_patch(&mut self, name: &str) {
        self.skipped += 1;
        self.bar.set_message(format!("skipped {name}"));
        self.bar.inc(1);
    }

    /// Number of patches written so far
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Number of patches skipped so far
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Close the bar with a summary line
    pub fn finish(&self) {
        self.bar.finish_with_message(format!(
            "{} written, {} skipped",
            self.written, self.skipped
        ));
    }
}
