//! Progress indicator utilities for the hadoop-cluster CLI.
//!
//! Responsibilities:
//! - Provide a spinner for short filesystem operations and a progress bar
//!   that tracks connectivity test categories.
//! - Ensure ALL progress output is written to STDERR (never stdout), so
//!   machine-readable command output is not contaminated.
//! - Allow global suppression via a caller-provided `enabled` boolean (driven by `--quiet`).
//!
//! Non-responsibilities:
//! - This module does not decide *when* progress should be shown; callers do.
//! - This module does not print command results; stdout remains reserved for results.

use std::time::Duration;

use hadoop_cluster::{ProgressSink, RuntimeTestStatus};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// An indefinite spinner for short/unknown-duration operations.
///
/// Always draws to STDERR; no-op when disabled.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(style("{spinner} {msg}"));
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    /// Finish the spinner with a stable message (on STDERR).
    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(format!("{} done", self.label));
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// Progress bar fed by the connectivity test runner.
pub(crate) struct TestProgress {
    pb: Option<ProgressBar>,
}

impl TestProgress {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, cluster: &str, total: usize) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(style("{spinner} {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}").progress_chars("=>-"));
        pb.set_prefix(format!("Testing {cluster}"));
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb: Some(pb) }
    }
}

impl ProgressSink for TestProgress {
    fn on_progress(&self, status: &RuntimeTestStatus) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.set_position(status.completed as u64);
        if let Some(latest) = &status.latest {
            pb.set_message(format!(
                "{}: {}",
                latest.category_name,
                latest.status.as_str()
            ));
        }
        if status.done {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TestProgress {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
