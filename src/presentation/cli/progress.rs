//! Progress reporting for CLI

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a conversion runs
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Starts a spinner with `message`
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let template = "{spinner:.green} {msg} [{elapsed}]";
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Starts the spinner for converting `name` to `label`
    pub fn for_conversion(name: &str, label: &str) -> Self {
        Self::spinner(&format!("Converting {} to {}...", name, label))
    }

    /// Finishes with a message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stops the spinner, leaving `message` on screen
    pub fn fail(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}
