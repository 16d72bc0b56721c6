//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hold notice - the clip played to callers while they wait
#[derive(Parser, Debug)]
#[command(name = "hold-notice")]
#[command(version)]
#[command(about = "Record and play the hold notification played to waiting callers")]
#[command(long_about = None)]
pub struct Cli {
    /// Storage root for the recorded clip
    #[arg(long, global = true, value_name = "DIR", env = "HOLD_NOTICE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Show desktop notifications
    #[arg(short = 'n', long, global = true)]
    pub notify: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive recording dialog
    Record,
    /// Play the stored clip
    Play,
    /// Show details about the stored clip
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the stored clip
    Delete,
    /// Handle an incoming-call notification action
    Action {
        /// accept_call, decline_call or play_notification_and_accept
        #[arg(value_name = "ACTION")]
        action: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "storage_dir",
    "notify",
    "call.accept_command",
    "call.reject_command",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_record() {
        let cli = Cli::parse_from(["hold-notice", "record"]);
        assert!(matches!(cli.command, Commands::Record));
        assert!(!cli.notify);
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["hold-notice", "play", "-n", "--storage-dir", "/tmp/hold"]);
        assert!(matches!(cli.command, Commands::Play));
        assert!(cli.notify);
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/hold")));
    }

    #[test]
    fn cli_parses_info_json() {
        let cli = Cli::parse_from(["hold-notice", "info", "--json"]);
        assert!(matches!(cli.command, Commands::Info { json: true }));
    }

    #[test]
    fn cli_keeps_action_identifier_verbatim() {
        let cli = Cli::parse_from(["hold-notice", "action", "play_notification_and_accept"]);
        if let Commands::Action { action } = cli.command {
            assert_eq!(action, "play_notification_and_accept");
        } else {
            panic!("Expected Action command");
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["hold-notice", "config", "set", "notify", "true"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "notify");
            assert_eq!(value, "true");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["hold-notice"]).is_err());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("storage_dir"));
        assert!(is_valid_config_key("call.accept_command"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
