//! Harvest command implementation for the harvester CLI
//!
//! This module drives the full snapshot workflow: configuration from
//! arguments, pipeline execution across all regions and the final report.

use super::shared::setup_logging;
use crate::Result;
use crate::app::pipeline::{HarvestPipeline, HarvestStats};
use crate::cli::args::{HarvestArgs, OutputFormat};
use indicatif::HumanDuration;
use std::sync::Arc;
use tracing::{debug, info};

/// Harvest command runner
///
/// This function orchestrates the entire harvest workflow:
/// 1. Set up logging and validate arguments
/// 2. Build the run configuration
/// 3. Drive the pipeline across all configured regions
/// 4. Generate the final report
pub async fn run_harvest(args: HarvestArgs) -> Result<()> {
    // Set up logging
    setup_logging(&args)?;

    info!("Starting Tribal Wars harvester");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    let config = Arc::new(args.to_config());
    info!(
        "Harvesting {} regions into {}",
        config.regions.len(),
        config.output_root().display()
    );

    let pipeline = HarvestPipeline::new(config)?;
    let stats = pipeline.run(args.show_progress()).await?;

    // Generate final report
    generate_final_report(&args, &stats)
}

/// Generate final harvest report
fn generate_final_report(args: &HarvestArgs, stats: &HarvestStats) -> Result<()> {
    info!("Generating final report");

    match args.output_format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &HarvestStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);

    println!("\n🎉 Harvest Complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📊 Harvest Summary:");
    println!("   • Regions resolved: {}", stats.regions_resolved);
    println!("   • Worlds discovered: {}", stats.worlds_discovered);
    println!("   • Snapshots written: {}", stats.snapshots_written);
    println!("   • Snapshots skipped: {}", stats.units_skipped);
    println!("   • Rows written: {}", stats.rows_written);
    println!("   • Server table rows: {}", stats.server_rows);
    println!("   • Processing time: {}", duration);

    if stats.regions_failed > 0 {
        println!("⚠️  Regions failed: {}", stats.regions_failed);
    }
    if stats.units_failed > 0 {
        println!("⚠️  Snapshots failed: {}", stats.units_failed);
    }
    if stats.rows_dropped > 0 {
        println!("⚠️  Rows dropped during validation: {}", stats.rows_dropped);
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &HarvestStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "regions_resolved": stats.regions_resolved,
        "regions_failed": stats.regions_failed,
        "worlds_discovered": stats.worlds_discovered,
        "server_rows": stats.server_rows,
        "snapshots_written": stats.snapshots_written,
        "snapshots_skipped": stats.units_skipped,
        "snapshots_failed": stats.units_failed,
        "rows_written": stats.rows_written,
        "rows_dropped": stats.rows_dropped,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
    });

    println!("{}", serde_json::to_string_pretty(&json_stats).unwrap());
    Ok(())
}
