//! Progress bar for multi-step walks

use super::context::UiContext;
use crate::neighborhood::RegenerationReport;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over a walk of several tiles
///
/// Shows an indicatif bar in interactive mode and nothing in CI, where the
/// command prints a summary once the walk is done.
pub struct WalkProgress {
    bar: Option<ProgressBar>,
}

impl WalkProgress {
    pub fn new(ctx: &UiContext, direction: &str, steps: u32) -> Self {
        let bar = (ctx.use_fancy_output() && steps > 1).then(|| {
            let bar = ProgressBar::new(u64::from(steps));
            if let Ok(style) = ProgressStyle::default_bar()
                .template("  {spinner:.yellow} Walking {prefix}  {bar:20.yellow/dim} {pos}/{len} {msg:.dim}")
            {
                bar.set_style(style.progress_chars("━╸─"));
            }
            bar.set_prefix(direction.to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        Self { bar }
    }

    /// Record one completed step
    pub fn on_step(&self, report: &RegenerationReport) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
            bar.set_message(format!(
                "+{} -{} caches",
                report.spawned().count(),
                report.evicted.len()
            ));
        }
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}
