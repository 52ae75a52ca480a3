//! Shared components for CLI commands
//!
//! This module contains common utilities used across the command
//! implementations: logging setup, progress bars and error triage.

use crate::cli::args::{HarvestArgs, WorldsArgs};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Set up structured logging for the harvest command
pub fn setup_logging(args: &HarvestArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tw_harvester={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Set up structured logging for the worlds command
pub fn setup_worlds_logging(args: &WorldsArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tw_harvester={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Check if an error is critical enough to stop the run
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::Interrupted { .. }
    )
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_critical_error() {
        let config_error = Error::configuration("bad worker count");
        let interrupted_error = Error::interrupted("ctrl-c");
        let parse_error = Error::directory_parse("http://test", "no tokens");
        let io_error = Error::io(
            "read failed",
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );

        assert!(is_critical_error(&config_error));
        assert!(is_critical_error(&interrupted_error));
        assert!(!is_critical_error(&parse_error));
        assert!(!is_critical_error(&io_error));
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(10, "testing");
        assert_eq!(pb.length(), Some(10));
        pb.finish_and_clear();
    }
}
