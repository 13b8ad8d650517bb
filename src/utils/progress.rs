//! Terminal progress for long exhaustive searches.

use crate::domain::ports::ProgressObserver;
use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} permutations (ETA: {eta})";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Searches smaller than this finish before a bar is worth drawing.
const MIN_TOTAL_FOR_BAR: u64 = 100_000;

/// Draws an indicatif bar on stderr when the search size is known and large.
#[derive(Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for BarProgress {
    fn on_start(&mut self, total: Option<u64>) {
        self.bar = match total {
            Some(total) if total >= MIN_TOTAL_FOR_BAR => {
                let bar = ProgressBar::new(total);
                match ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
                    Ok(style) => bar.set_style(style.progress_chars(PROGRESS_CHARS)),
                    Err(e) => tracing::debug!("Falling back to default progress style: {}", e),
                }
                Some(bar)
            }
            _ => None,
        };
    }

    fn on_progress(&mut self, checked: u64) {
        match &self.bar {
            Some(bar) => bar.set_position(checked),
            None => tracing::trace!("{} candidates checked", checked),
        }
    }

    fn on_finish(&mut self, checked: u64, valid: u64) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        tracing::debug!("{} candidates checked, {} valid", checked, valid);
    }
}
