pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::{ChronosError, Result};
#[cfg(feature = "cli")]
use chrono::NaiveDateTime;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "retro-chronos")]
#[command(about = "A retro seven-segment terminal clock that tunes in to multiverse transmissions")]
pub struct CliConfig {
    #[arg(long = "24h", alias = "twenty-four-hour", help = "Start in 24-hour mode")]
    pub twenty_four_hour: bool,

    #[arg(long, help = "Display theme: AMBER, CYAN, GREEN or MAGENTA")]
    pub theme: Option<String>,

    #[arg(long, help = "Start in the fullscreen layout")]
    pub fullscreen: bool,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Base URL of the generative language API")]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, help = "Request timeout in seconds (default: none)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Print the clock once and exit")]
    pub once: bool,

    #[arg(long, requires = "once", help = "With --once, also tune in to one transmission")]
    pub tune_in: bool,

    #[arg(
        long,
        requires = "once",
        value_parser = parse_instant,
        help = "With --once, render this local time (YYYY-MM-DDTHH:MM:SS) instead of now"
    )]
    pub at: Option<NaiveDateTime>,

    #[arg(long, help = "Write JSON logs to this file")]
    pub log_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
fn parse_instant(value: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {}", e))
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Load the config file (if any) and layer the command-line flags on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path).map_err(|e| match e {
                ChronosError::IoError(io) => ChronosError::ConfigError {
                    message: format!("cannot read '{}': {}", path, io),
                },
                other => other,
            })?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if self.twenty_four_hour {
            config.display.hour_format_24 = true;
        }
        if let Some(theme) = &self.theme {
            config.display.theme = theme.clone();
        }
        if self.fullscreen {
            config.display.fullscreen = true;
        }
        if let Some(api_key) = &self.api_key {
            config.transmission.api_key = Some(api_key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.transmission.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.transmission.model = model.clone();
        }
        if let Some(timeout) = self.timeout {
            config.transmission.timeout_seconds = Some(timeout);
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
        if self.verbose {
            config.logging.level = Some("debug".to_string());
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["retro-chronos"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = parse(&["--api-key", "k"]);
        let config = cli.resolve().unwrap();

        assert!(!config.display.hour_format_24);
        assert_eq!(config.display.theme, "AMBER");
        assert_eq!(config.api_key(), Some("k"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[display]
theme = "GREEN"

[transmission]
model = "from-file"
timeout_seconds = 10
"#,
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = parse(&["--config", path, "--24h", "--theme", "cyan", "--timeout", "20"]);
        let config = cli.resolve().unwrap();

        assert!(config.display.hour_format_24);
        assert_eq!(config.display.theme, "cyan");
        assert_eq!(config.model(), "from-file");
        assert_eq!(config.transmission.timeout_seconds, Some(20));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let cli = parse(&["--config", "/no/such/chronos.toml"]);
        let err = cli.resolve().unwrap_err();
        assert!(matches!(err, ChronosError::ConfigError { .. }));
    }

    #[test]
    fn test_at_requires_once() {
        let argv = ["retro-chronos", "--at", "2026-10-18T13:05:09"];
        assert!(CliConfig::try_parse_from(argv).is_err());

        let cli = parse(&["--once", "--at", "2026-10-18T13:05:09"]);
        assert_eq!(cli.at.unwrap().to_string(), "2026-10-18 13:05:09");
    }

    #[test]
    fn test_bad_instant_is_rejected() {
        let argv = ["retro-chronos", "--once", "--at", "half past nine"];
        assert!(CliConfig::try_parse_from(argv).is_err());
    }
}
