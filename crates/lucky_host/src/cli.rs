//! Command-line interface for the host binary.

use crate::config::HostConfig;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "lucky_host.toml";

/// Parsed command-line arguments.
///
/// Every override is optional and wins over the value in the configuration
/// file.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub plugin_config_dir: Option<PathBuf>,
    pub tick_interval_ms: Option<u64>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl CliArgs {
    fn command() -> Command {
        Command::new("Lucky Barrel Host")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Runs the Lucky Barrel plugin over an in-memory world")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value(DEFAULT_CONFIG_PATH),
            )
            .arg(
                Arg::new("plugin-config")
                    .short('p')
                    .long("plugin-config")
                    .value_name("DIR")
                    .help("Directory for plugin configuration files"),
            )
            .arg(
                Arg::new("tick-ms")
                    .short('t')
                    .long("tick-ms")
                    .value_name("MILLIS")
                    .help("Tick interval in milliseconds")
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    /// Parses the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parses an explicit argument list; the first item is the binary name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            plugin_config_dir: matches.get_one::<String>("plugin-config").map(PathBuf::from),
            tick_interval_ms: matches.get_one::<u64>("tick-ms").copied(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }

    /// Applies the command-line overrides to `config`.
    pub fn apply_overrides(&self, config: &mut HostConfig) {
        if let Some(dir) = &self.plugin_config_dir {
            config.plugins.config_directory = dir.to_string_lossy().into_owned();
        }
        if let Some(tick) = self.tick_interval_ms {
            config.server.tick_interval_ms = tick;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.json_format = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["lucky_host"]).unwrap();

        assert_eq!(args.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(args.plugin_config_dir, None);
        assert_eq!(args.tick_interval_ms, None);
        assert!(!args.json_logs);

        let mut config = HostConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.server.tick_interval_ms, 50);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let args = CliArgs::try_parse_from([
            "lucky_host",
            "--config",
            "/etc/lucky/host.toml",
            "-p",
            "/var/lib/lucky",
            "--tick-ms",
            "100",
            "-l",
            "debug",
            "--json-logs",
        ])
        .unwrap();

        assert_eq!(args.config_path, PathBuf::from("/etc/lucky/host.toml"));

        let mut config = HostConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.plugins.config_directory, "/var/lib/lucky");
        assert_eq!(config.server.tick_interval_ms, 100);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_rejects_non_numeric_tick() {
        assert!(CliArgs::try_parse_from(["lucky_host", "--tick-ms", "fast"]).is_err());
    }
}
