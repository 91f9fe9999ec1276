//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// Voice Recorder - record a clip from the default microphone
#[derive(Parser, Debug)]
#[command(name = "voice-recorder")]
#[command(version)]
#[command(about = "Record a fixed-length audio clip from the default input device to WAV, MP3 or FLAC")]
#[command(long_about = None)]
pub struct Cli {
    /// Recording duration (e.g., 5, 30s, 1m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<String>,

    /// Directory the recording is written to (created if missing)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Audio file format: wav, mp3 or flac (unsupported values fall back to wav)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
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

/// Parsed recording options (one-shot mode)
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub duration: Duration,
    pub output_dir: PathBuf,
    /// Requested format, validated by the recorder
    pub format: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["duration", "output_dir", "format"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voice-recorder"]);
        assert!(cli.duration.is_none());
        assert!(cli.output_dir.is_none());
        assert!(cli.format.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_recording_options() {
        let cli = Cli::parse_from([
            "voice-recorder",
            "-d",
            "10s",
            "-o",
            "/tmp/clips",
            "-f",
            "flac",
        ]);
        assert_eq!(cli.duration, Some("10s".to_string()));
        assert_eq!(cli.output_dir, Some("/tmp/clips".to_string()));
        assert_eq!(cli.format, Some("flac".to_string()));
    }

    #[test]
    fn cli_accepts_unknown_format_for_recorder_fallback() {
        let cli = Cli::parse_from(["voice-recorder", "--format", "wavf"]);
        assert_eq!(cli.format, Some("wavf".to_string()));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voice-recorder", "config", "set", "format", "mp3"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "format");
            assert_eq!(value, "mp3");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_config_path() {
        let cli = Cli::parse_from(["voice-recorder", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("duration"));
        assert!(is_valid_config_key("output_dir"));
        assert!(is_valid_config_key("format"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
