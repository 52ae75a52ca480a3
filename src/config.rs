//! Configuration management and validation.
//!
//! Provides the harvest run configuration: which regional portals to
//! resolve, where snapshots land, and how aggressively endpoints are
//! fetched.

use crate::constants::{
    DEFAULT_REGIONS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_PARALLEL_WORKERS,
    default_worker_count,
};
use crate::{Error, Result};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvesterConfig {
    /// Regional portal specs to resolve; bare domains or full http(s) URLs
    pub regions: Vec<String>,

    /// Root directory the `data/` tree is created under
    pub output_root: PathBuf,

    /// Capture date stamped on snapshots; `None` resolves to today at run start
    pub capture_date: Option<NaiveDate>,

    /// Number of concurrent world/kind work units
    pub workers: usize,

    /// HTTP timeout per request, in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            output_root: PathBuf::from("."),
            capture_date: None,
            workers: default_worker_count(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HarvesterConfig {
    /// Create configuration with custom regional portals
    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        self.regions = regions;
        self
    }

    /// Create configuration with a custom output root
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    /// Create configuration with an explicit capture date
    pub fn with_capture_date(mut self, capture_date: NaiveDate) -> Self {
        self.capture_date = Some(capture_date);
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with a custom request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the configuration before a run
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(Error::configuration(
                "at least one regional portal is required",
            ));
        }
        for region in &self.regions {
            validate_region(region)?;
        }
        if self.workers == 0 || self.workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "workers must be between 1 and {}, got {}",
                MAX_PARALLEL_WORKERS, self.workers
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration("timeout must be at least 1 second"));
        }
        Ok(())
    }

    /// Capture date for this run, defaulting to today
    pub fn resolved_capture_date(&self) -> NaiveDate {
        self.capture_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Root of the harvested data tree
    pub fn data_dir(&self) -> PathBuf {
        self.output_root.join(crate::constants::DATA_DIR_NAME)
    }

    /// Output root as a path
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

/// Check a single regional portal spec
pub fn validate_region(region: &str) -> Result<()> {
    if region.trim().is_empty() {
        return Err(Error::configuration("region spec must not be empty"));
    }
    if region.chars().any(char::is_whitespace) {
        return Err(Error::configuration(format!(
            "region spec '{}' must not contain whitespace",
            region
        )));
    }
    let has_scheme = region.starts_with("http://") || region.starts_with("https://");
    if !has_scheme && region.contains('/') {
        return Err(Error::configuration(format!(
            "region spec '{}' must be a bare domain or a full http(s) URL",
            region
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HarvesterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.regions.len(), 3);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_builder_methods() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let config = HarvesterConfig::default()
            .with_regions(vec!["tribalwars.com.pt".to_string()])
            .with_output_root("/tmp/harvest")
            .with_capture_date(date)
            .with_workers(4)
            .with_timeout_secs(10);

        assert_eq!(config.regions, vec!["tribalwars.com.pt"]);
        assert_eq!(config.output_root, PathBuf::from("/tmp/harvest"));
        assert_eq!(config.resolved_capture_date(), date);
        assert_eq!(config.workers, 4);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_regions_rejected() {
        let config = HarvesterConfig::default().with_regions(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_region_rejected() {
        let config =
            HarvesterConfig::default().with_regions(vec!["tribalwars.com.pt/extra".to_string()]);
        assert!(config.validate().is_err());

        let config = HarvesterConfig::default().with_regions(vec!["two words.de".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_region_with_scheme_accepted() {
        let config =
            HarvesterConfig::default().with_regions(vec!["http://127.0.0.1:9000".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_worker_bounds() {
        let config = HarvesterConfig::default().with_workers(0);
        assert!(config.validate().is_err());

        let config = HarvesterConfig::default().with_workers(MAX_PARALLEL_WORKERS + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_data_dir_under_output_root() {
        let config = HarvesterConfig::default().with_output_root("/tmp/harvest");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/harvest/data"));
    }
}
