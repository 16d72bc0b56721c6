//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod record;
pub mod signals;

// Re-export commonly used types
pub use app::{run_action, run_delete, run_info, run_play, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
pub use record::run_record_dialog;
