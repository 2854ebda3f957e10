//! Progress display for release note generation
//!
//! A spinner runs while the commit range is walked, then a counter while
//! change requests are fetched. Everything is drawn on stderr by indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const WALK_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const FETCH_TEMPLATE: &str = "{spinner:.cyan} {msg} [{bar:24.cyan/blue}] {pos}/{len}";

/// Progress reporter; a no-op in quiet mode
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Indeterminate phase, e.g. walking commits
    pub fn spinner(&mut self, message: &str) {
        self.replace(ProgressBar::new_spinner(), WALK_TEMPLATE, message);
    }

    /// Counted phase over `total` change requests
    pub fn start(&mut self, total: u64, message: &str) {
        self.replace(ProgressBar::new(total), FETCH_TEMPLATE, message);
    }

    fn replace(&mut self, bar: ProgressBar, template: &str, message: &str) {
        if !self.enabled {
            return;
        }
        self.finish_and_clear();

        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    pub fn inc(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
