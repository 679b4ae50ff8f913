//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::api::{DEFAULT_API_URL, DEFAULT_GEOCODE_URL};
use crate::route;

/// WorldWise - keep track of the cities you have visited
#[derive(Parser, Debug)]
#[command(name = "worldwise")]
#[command(about = "A travel log TUI backed by a cities REST API")]
pub struct Args {
    /// Base URL of the cities backend
    #[arg(long, env = "WORLDWISE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Reverse-geocoding endpoint
    #[arg(long, env = "WORLDWISE_GEOCODE_URL", default_value = DEFAULT_GEOCODE_URL)]
    pub geocode_url: String,

    /// URL to open on startup, e.g. "/app/form?lat=38.7&lng=-9.1"
    #[arg(long, default_value = route::ROOT)]
    pub route: String,

    /// Log file (defaults to the platform data directory)
    #[arg(long, env = "WORLDWISE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Spinner tick in milliseconds (minimum 10)
    #[arg(long, default_value = "120", value_parser = clap::value_parser!(u64).range(10..))]
    pub tick_ms: u64,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

/// Resolved settings handed to the runtime
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub geocode_url: String,
    pub start_url: String,
    pub log_file: Option<PathBuf>,
    pub tick: Duration,
}

impl Args {
    /// Split off the debug flags and resolve the rest
    pub fn into_parts(self) -> (Config, DebugCliArgs) {
        let config = Config {
            api_url: self.api_url.trim().trim_end_matches('/').to_string(),
            geocode_url: self.geocode_url.trim().to_string(),
            start_url: normalize_route(&self.route),
            log_file: self.log_file.or_else(default_log_file),
            tick: Duration::from_millis(self.tick_ms),
        };
        (config, self.debug)
    }
}

/// `<data-local-dir>/worldwise/worldwise.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs_next::data_local_dir().map(|dir| dir.join("worldwise").join("worldwise.log"))
}

fn normalize_route(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}
