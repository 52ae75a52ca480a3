//! Tribal Wars Harvester Library
//!
//! A Rust library for harvesting public Tribal Wars world data into dated
//! NDJSON snapshot files suitable for downstream analysis.
//!
//! This library provides tools for:
//! - Resolving world directories from regional portal endpoints
//! - Fetching and parsing the positional map exports (villages, players, allies, rankings)
//! - Validating raw rows against fixed per-kind schemas with row-level tolerance
//! - Writing idempotent, dated snapshot files with atomic rename semantics
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod pipeline;
    pub mod services {
        pub mod fetch;
        pub mod record_parser;
        pub mod schema;
        pub mod snapshot;
        pub mod world_directory;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{GameWorld, RecordKind};
pub use app::pipeline::{HarvestPipeline, HarvestStats};
pub use config::HarvesterConfig;

/// Result type alias for the harvester
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for harvesting operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Endpoint fetch error
    #[error("Fetch error for '{url}': {message}")]
    Fetch {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Server directory payload could not be interpreted
    #[error("Directory parse error for '{url}': {message}")]
    DirectoryParse { url: String, message: String },

    /// Every row of a fetched batch failed validation
    #[error("Batch validation error for {kind} on world '{world}': {message}")]
    BatchValidation {
        world: String,
        kind: String,
        message: String,
    },

    /// Dataframe construction or transformation error
    #[error("Dataframe error: {message}")]
    Frame {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Snapshot file writing error
    #[error("Snapshot write error for '{path}': {message}")]
    SnapshotWrite {
        path: String,
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Harvest interrupted
    #[error("Harvest interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a fetch error with context
    pub fn fetch(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a directory parse error
    pub fn directory_parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DirectoryParse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a batch validation error
    pub fn batch_validation(
        world: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::BatchValidation {
            world: world.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a dataframe error with context
    pub fn frame(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Frame {
            message: message.into(),
            source,
        }
    }

    /// Create a snapshot write error
    pub fn snapshot_write(
        path: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::SnapshotWrite {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Frame {
            message: "dataframe operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::Fetch {
            url,
            message: "HTTP request failed".to_string(),
            source: Some(error),
        }
    }
}
