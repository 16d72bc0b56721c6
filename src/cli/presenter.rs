//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::dialog::RenderState;

/// Keys understood by the interactive dialog
pub const DIALOG_KEYS: &str = "[r] record/stop  [p] play  [d] delete  [o] ok  [q] cancel";

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_some()
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.print_above(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.print_above(format!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.print_above(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.print_above(format!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Spinner line while recording
    pub fn format_recording(state: &RenderState) -> String {
        format!("Recording... {}", state.elapsed_clock())
    }

    /// Status line shown when the dialog is idle
    pub fn format_status(state: &RenderState) -> String {
        let record = format!("[r] {}", state.record_label().to_lowercase());
        if state.shows_asset_actions() {
            let keys = format!("{}  [p] play  [d] delete  [o] ok  [q] cancel", record);
            format!("{}  {}", state.status_text().green(), keys.dimmed())
        } else {
            let keys = format!("{}  [o] ok  [q] cancel", record);
            format!("{}  {}", state.status_text().yellow(), keys.dimmed())
        }
    }

    /// Reflect a dialog render state: spinner while recording, status line otherwise
    pub fn render_dialog(&mut self, state: &RenderState) {
        if state.is_recording {
            let line = Self::format_recording(state);
            if self.is_spinning() {
                self.update_spinner(&line);
            } else {
                self.start_spinner(&line);
            }
        } else {
            self.stop_spinner();
            eprintln!("{}", Self::format_status(state));
        }
    }

    /// Keep stderr messages from tearing through a running spinner
    fn print_above(&self, line: String) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
