use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);
const MIN_TICK_MS: u64 = 10;
const DATA_FILE_NAME: &str = "timer_data.json";
const LOG_FILE_NAME: &str = "tally.log";

/// Runtime settings resolved from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub tick_rate: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let data_file = cli.data_file.clone().unwrap_or_else(default_data_file);
        let log_file = cli
            .log_file
            .clone()
            .unwrap_or_else(|| default_log_file(&data_file));
        let tick_rate = cli
            .tick_ms
            .map_or(DEFAULT_TICK_RATE, |ms| Duration::from_millis(ms.max(MIN_TICK_MS)));
        Self {
            data_file,
            log_file,
            tick_rate,
        }
    }
}

/// Returns the default snapshot path inside the user's data directory.
/// Falls back to `./timer_data.json` when no data dir is found.
pub fn default_data_file() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join("tally").join(DATA_FILE_NAME),
        None => PathBuf::from(DATA_FILE_NAME),
    }
}

fn default_log_file(data_file: &Path) -> PathBuf {
    data_file.with_file_name(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn log_file_defaults_next_to_the_data_file() {
        let cli = Cli::parse_from(["tally", "--data-file", "/tmp/tally/data.json"]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.data_file, PathBuf::from("/tmp/tally/data.json"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/tally/tally.log"));
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn tick_rate_has_a_floor() {
        let cli = Cli::parse_from(["tally", "--tick-ms", "1"]);
        assert_eq!(Config::from_cli(&cli).tick_rate, Duration::from_millis(10));

        let cli = Cli::parse_from(["tally", "--tick-ms", "250"]);
        assert_eq!(Config::from_cli(&cli).tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn default_data_file_is_named_timer_data() {
        assert!(default_data_file().ends_with(DATA_FILE_NAME));
    }
}
