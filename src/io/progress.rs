//! Stage progress reporting for batch jobs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Displays one batch bar per pipeline stage (download, restore)
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active stage
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Begin a stage, replacing any bar left from the previous one
    pub fn start_stage(&mut self, label: &str, total: usize) {
        self.finish_stage();
        let bar = ProgressBar::new(total as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    /// Record one completed item in the current stage
    pub fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the current stage bar
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}
