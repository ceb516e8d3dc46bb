//! "Thinking..." spinner shown while a request is in flight

use indicatif::{ProgressBar, ProgressStyle};
use promptlog_application::TurnProgress;
use std::sync::Mutex;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner that runs between request start and completion
pub struct ThinkingSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl ThinkingSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Remove the spinner without waiting for completion (e.g. on Ctrl-C)
    pub fn clear(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }
}

impl Default for ThinkingSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgress for ThinkingSpinner {
    fn on_request_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Thinking...");
        pb.enable_steady_tick(TICK_INTERVAL);

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_request_complete(&self, _success: bool) {
        self.clear();
    }
}
