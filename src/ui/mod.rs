//! UI/Progress presentation layer
//!
//! - [`display`]: styled card summaries and warnings
//! - [`ProgressReporter`]: spinner shown while a network call is in flight
//!
//! Commands pick a reporter based on whether stderr is a terminal, so piped output
//! and tests stay free of spinner frames.

pub mod display;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Progress reporter for long-running network operations
pub trait ProgressReporter {
    /// Start or relabel the current step
    fn step(&mut self, message: &str);

    /// Clear the indicator after success
    fn finish(&mut self);

    /// Leave the indicator in place after an error
    fn abandon(&mut self);
}

/// Spinner on stderr
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICK_STRINGS);

        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&mut self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn finish(&mut self) {
        self.pb.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.pb.abandon();
    }
}

/// No-op reporter for non-interactive output
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn step(&mut self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}

/// Spinner when stderr is a terminal, silent otherwise
pub fn reporter() -> Box<dyn ProgressReporter> {
    if console::Term::stderr().is_term() {
        Box::new(SpinnerReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}
