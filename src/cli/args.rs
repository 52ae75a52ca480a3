//! Command-line argument definitions for the Tribal Wars harvester
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{HarvesterConfig, validate_region};
use crate::constants::{DEFAULT_REGIONS, DEFAULT_TIMEOUT_SECS, default_worker_count};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the Tribal Wars harvester
///
/// Harvests the public map exports of every active Tribal Wars world across
/// regional portals into dated NDJSON snapshot files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tw-harvester",
    version,
    about = "Harvest Tribal Wars world data into dated NDJSON snapshots",
    long_about = "A pipeline that resolves the active worlds of Tribal Wars regional portals, \
                  fetches each world's public map exports (villages, players, alliances and \
                  opponents-defeated rankings), validates them against fixed schemas and writes \
                  idempotent dated NDJSON snapshot files for downstream analysis."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the harvester
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Harvest snapshots for every world of the configured regions (default command)
    Harvest(HarvestArgs),
    /// Resolve and list the active worlds of the configured regions
    Worlds(WorldsArgs),
}

/// Arguments for the harvest command (main snapshot pipeline)
#[derive(Debug, Clone, Parser)]
pub struct HarvestArgs {
    /// Regional portals to harvest (comma-separated list)
    ///
    /// Accepts bare domains or full http(s) URLs. If not specified, harvests
    /// the default portals: tribalwars.com.pt, die-staemme.de, tribalwars.com.br
    #[arg(
        short = 'r',
        long = "regions",
        value_name = "LIST",
        help = "Comma-separated list of regional portals to harvest",
        long_help = "Regional portals to harvest as a comma-separated list.\n\
                     Each entry is a bare domain (\"tribalwars.com.pt\") or a full\n\
                     http(s) URL for non-standard portals.\n\n\
                     If not specified, harvests the default portals:\n  \
                     tribalwars.com.pt, die-staemme.de, tribalwars.com.br"
    )]
    pub regions: Option<RegionList>,

    /// Output root directory
    ///
    /// The data/ tree with all snapshot kinds is created under this root.
    /// If not specified, defaults to the current directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output root the data/ tree is created under"
    )]
    pub output: Option<PathBuf>,

    /// Capture date stamped on snapshots
    ///
    /// Snapshots are grouped by this date and every record's datetime column
    /// carries it. If not specified, uses today's local date.
    #[arg(
        long = "date",
        value_name = "YYYY-MM-DD",
        help = "Capture date for snapshots (defaults to today)"
    )]
    pub date: Option<NaiveDate>,

    /// Number of concurrent work units
    ///
    /// Controls how many world/kind snapshots are fetched and written
    /// concurrently. More workers finish faster but hit the portals harder.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = default_worker_count(),
        help = "Number of concurrent world/kind fetches"
    )]
    pub workers: usize,

    /// HTTP timeout per request
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "HTTP timeout per request in seconds"
    )]
    pub timeout_secs: u64,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the final report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the final report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the worlds command (directory listing)
#[derive(Debug, Clone, Parser)]
pub struct WorldsArgs {
    /// Regional portals to resolve (comma-separated list)
    ///
    /// If not specified, resolves the default portals.
    #[arg(
        short = 'r',
        long = "regions",
        value_name = "LIST",
        help = "Comma-separated list of regional portals to resolve"
    )]
    pub regions: Option<RegionList>,

    /// HTTP timeout per request
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "HTTP timeout per request in seconds"
    )]
    pub timeout_secs: u64,

    /// Output format for the world listing
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the world listing"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated region lists
#[derive(Debug, Clone)]
pub struct RegionList {
    pub regions: Vec<String>,
}

impl FromStr for RegionList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let regions: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if regions.is_empty() {
            return Err(Error::configuration("region list cannot be empty"));
        }

        for region in &regions {
            validate_region(region)?;
        }

        Ok(RegionList { regions })
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl HarvestArgs {
    /// Validate the harvest command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.to_config().validate()
    }

    /// Get the list of regions to harvest
    pub fn get_regions(&self) -> Vec<String> {
        match &self.regions {
            Some(region_list) => region_list.regions.clone(),
            None => DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build the run configuration from these arguments
    pub fn to_config(&self) -> HarvesterConfig {
        let mut config = HarvesterConfig::default()
            .with_regions(self.get_regions())
            .with_workers(self.workers)
            .with_timeout_secs(self.timeout_secs);
        if let Some(output) = &self.output {
            config = config.with_output_root(output.clone());
        }
        if let Some(date) = self.date {
            config = config.with_capture_date(date);
        }
        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl WorldsArgs {
    /// Get the list of regions to resolve
    pub fn get_regions(&self) -> Vec<String> {
        match &self.regions {
            Some(region_list) => region_list.regions.clone(),
            None => DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for HarvestArgs {
    fn default() -> Self {
        Self {
            regions: None,
            output: None,
            date: None,
            workers: default_worker_count(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_PARALLEL_WORKERS;

    #[test]
    fn test_region_list_parsing() {
        // Valid single region
        let result = RegionList::from_str("tribalwars.com.pt").unwrap();
        assert_eq!(result.regions, vec!["tribalwars.com.pt"]);

        // Valid multiple regions
        let result = RegionList::from_str("tribalwars.com.pt,die-staemme.de").unwrap();
        assert_eq!(result.regions, vec!["tribalwars.com.pt", "die-staemme.de"]);

        // Valid with spaces
        let result = RegionList::from_str(" tribalwars.com.pt , die-staemme.de ").unwrap();
        assert_eq!(result.regions, vec!["tribalwars.com.pt", "die-staemme.de"]);

        // Full URLs are accepted for non-standard portals
        let result = RegionList::from_str("http://127.0.0.1:9000").unwrap();
        assert_eq!(result.regions, vec!["http://127.0.0.1:9000"]);

        // Empty string
        assert!(RegionList::from_str("").is_err());

        // Only commas
        assert!(RegionList::from_str(",,,").is_err());

        // Path without a scheme
        assert!(RegionList::from_str("tribalwars.com.pt/extra").is_err());

        // Embedded whitespace
        assert!(RegionList::from_str("two words.de").is_err());
    }

    #[test]
    fn test_harvest_args_validation() {
        let args = HarvestArgs::default();
        assert!(args.validate().is_ok());

        let mut invalid_args = args.clone();
        invalid_args.workers = 0;
        assert!(invalid_args.validate().is_err());

        invalid_args.workers = MAX_PARALLEL_WORKERS + 1;
        assert!(invalid_args.validate().is_err());

        let mut invalid_args = args.clone();
        invalid_args.timeout_secs = 0;
        assert!(invalid_args.validate().is_err());
    }

    #[test]
    fn test_harvest_args_get_regions() {
        // Default regions
        let args = HarvestArgs::default();
        assert_eq!(args.get_regions(), DEFAULT_REGIONS);

        // Custom regions
        let mut args = args;
        args.regions = Some(RegionList {
            regions: vec!["die-staemme.de".to_string()],
        });
        assert_eq!(args.get_regions(), vec!["die-staemme.de"]);
    }

    #[test]
    fn test_harvest_args_to_config() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let args = HarvestArgs {
            regions: Some(RegionList {
                regions: vec!["tribalwars.com.br".to_string()],
            }),
            output: Some(PathBuf::from("/tmp/harvest")),
            date: Some(date),
            workers: 4,
            timeout_secs: 10,
            ..Default::default()
        };

        let config = args.to_config();
        assert_eq!(config.regions, vec!["tribalwars.com.br"]);
        assert_eq!(config.output_root, PathBuf::from("/tmp/harvest"));
        assert_eq!(config.resolved_capture_date(), date);
        assert_eq!(config.workers, 4);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_log_level() {
        let mut args = HarvestArgs::default();

        // Default level
        assert_eq!(args.get_log_level(), "warn");

        // Verbose levels
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        // Quiet mode
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_show_progress() {
        let mut args = HarvestArgs::default();
        assert!(args.show_progress());

        args.quiet = true;
        assert!(!args.show_progress());
    }

    #[test]
    fn test_date_parses_from_iso_string() {
        let date: NaiveDate = "2024-03-01".parse().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
