//! Harvest pipeline from region directories to dated snapshot files
//!
//! The pipeline resolves every configured region's world directory once,
//! writes the cross-region server table, then fans the discovered worlds out
//! into independent (world, kind) work units processed concurrently with a
//! bounded worker count. Units whose snapshot already exists are skipped
//! before any network traffic; a unit that fails is logged and never halts
//! the rest of the run.

use crate::app::models::{GameWorld, RecordKind, ServerRow, WriteOutcome};
use crate::app::services::fetch::EndpointClient;
use crate::app::services::record_parser::parse_batch;
use crate::app::services::schema::validate_batch;
use crate::app::services::snapshot::SnapshotStore;
use crate::app::services::world_directory::{self, RegionDirectory};
use crate::cli::commands::shared::{create_progress_bar, is_critical_error};
use crate::config::HarvesterConfig;
use crate::{Error, Result, constants};

use chrono::NaiveDate;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// One independent piece of harvest work
#[derive(Debug, Clone)]
struct HarvestUnit {
    world: GameWorld,
    kind: RecordKind,
}

/// What one completed unit contributed to the run
struct UnitReport {
    outcome: WriteOutcome,
    rows_dropped: usize,
}

/// Pipeline driving configured regions to dated snapshot files
pub struct HarvestPipeline {
    config: Arc<HarvesterConfig>,
    client: EndpointClient,
    store: SnapshotStore,
}

impl HarvestPipeline {
    /// Create a pipeline for the given configuration
    pub fn new(config: Arc<HarvesterConfig>) -> Result<Self> {
        let client = EndpointClient::from_config(&config)?;
        let store = SnapshotStore::new(config.data_dir());
        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// Snapshot store the pipeline writes through
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Resolve the directories of all configured regions
    ///
    /// Regions resolve concurrently. A region that fails is logged and
    /// skipped so the remaining regions still harvest; the failure count is
    /// returned alongside the resolved directories.
    pub async fn resolve_regions(&self) -> (Vec<RegionDirectory>, usize) {
        let lookups = self.config.regions.iter().map(|region| async move {
            let result = world_directory::resolve_region(&self.client, region).await;
            (region.clone(), result)
        });

        let mut directories = Vec::new();
        let mut failed = 0;
        for (region, result) in join_all(lookups).await {
            match result {
                Ok(directory) => directories.push(directory),
                Err(e) => {
                    error!("Failed to resolve region '{}': {}", region, e);
                    failed += 1;
                }
            }
        }
        (directories, failed)
    }

    /// Run the full harvest and report what happened
    pub async fn run(&self, show_progress: bool) -> Result<HarvestStats> {
        let start_time = Instant::now();
        let capture_date = self.config.resolved_capture_date();
        let mut stats = HarvestStats::default();

        info!(
            "Starting harvest of {} regions for {} with {} workers",
            self.config.regions.len(),
            capture_date,
            self.config.workers
        );

        // Worlds are discovered once and shared by every kind
        let (directories, regions_failed) = self.resolve_regions().await;
        stats.regions_resolved = directories.len();
        stats.regions_failed = regions_failed;

        if directories.is_empty() {
            return Err(Error::configuration(format!(
                "no region directory could be resolved ({} failed)",
                regions_failed
            )));
        }

        let server_rows: Vec<ServerRow> = directories
            .iter()
            .flat_map(|directory| directory.rows.clone())
            .collect();
        stats.server_rows = self.store.write_server_table(&server_rows)?;

        let worlds: Vec<GameWorld> = directories
            .iter()
            .flat_map(|directory| directory.worlds())
            .collect();
        stats.worlds_discovered = worlds.len();

        // Expand to (world, kind) units, skipping snapshots that already exist
        let mut units = Vec::new();
        for world in &worlds {
            for kind in RecordKind::all() {
                if self.store.snapshot_exists(kind, capture_date, &world.code) {
                    stats.units_skipped += 1;
                } else {
                    units.push(HarvestUnit {
                        world: world.clone(),
                        kind,
                    });
                }
            }
        }

        info!(
            "Discovered {} worlds: {} snapshots to write, {} already exist",
            worlds.len(),
            units.len(),
            stats.units_skipped
        );

        let progress_bar = if show_progress && !units.is_empty() {
            Some(create_progress_bar(
                units.len() as u64,
                &format!("Harvesting {} snapshots...", units.len()),
            ))
        } else {
            None
        };

        let mut results = stream::iter(units)
            .map(|unit| async move {
                let report = self.harvest_unit(&unit, capture_date).await;
                (unit, report)
            })
            .buffer_unordered(self.config.workers);

        while let Some((unit, result)) = results.next().await {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
            match result {
                Ok(report) => {
                    match report.outcome {
                        WriteOutcome::Written { rows } => {
                            stats.snapshots_written += 1;
                            stats.rows_written += rows;
                        }
                        WriteOutcome::SkippedExisting => stats.units_skipped += 1,
                    }
                    stats.rows_dropped += report.rows_dropped;
                }
                Err(e) if is_critical_error(&e) => return Err(e),
                Err(e) => {
                    error!(
                        "Failed to harvest {} data for '{}': {}",
                        unit.kind, unit.world.code, e
                    );
                    stats.units_failed += 1;
                }
            }
        }

        stats.processing_time = start_time.elapsed();

        if let Some(pb) = &progress_bar {
            pb.finish_with_message(format!(
                "Completed: {} snapshots written, {} skipped, {} failed",
                stats.snapshots_written, stats.units_skipped, stats.units_failed
            ));
        }

        info!(
            "Harvest complete: {} snapshots in {:.2}s ({:.1} snapshots/sec)",
            stats.snapshots_written,
            stats.processing_time.as_secs_f64(),
            stats.snapshots_per_second()
        );

        Ok(stats)
    }

    /// Fetch, parse, validate and persist one world/kind snapshot
    async fn harvest_unit(&self, unit: &HarvestUnit, capture_date: NaiveDate) -> Result<UnitReport> {
        let url = unit.world.endpoint_url(unit.kind);
        let payload = self.client.fetch_map_export(&url).await?;
        let (batch, _parse_stats) =
            parse_batch(&unit.world.code, unit.kind, capture_date, &payload);
        let validated = validate_batch(&batch)?;
        let outcome = self.store.write_batch(&validated, capture_date)?;
        Ok(UnitReport {
            outcome,
            rows_dropped: validated.rows_dropped,
        })
    }
}

/// Statistics for one pipeline run
#[derive(Debug, Default)]
pub struct HarvestStats {
    pub regions_resolved: usize,
    pub regions_failed: usize,
    pub worlds_discovered: usize,
    pub server_rows: usize,
    pub snapshots_written: usize,
    pub units_skipped: usize,
    pub units_failed: usize,
    pub rows_written: usize,
    pub rows_dropped: usize,
    pub processing_time: std::time::Duration,
}

impl HarvestStats {
    /// Calculate snapshots written per second
    pub fn snapshots_per_second(&self) -> f64 {
        if self.processing_time.as_secs_f64() > 0.0 {
            self.snapshots_written as f64 / self.processing_time.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate rows written per second
    pub fn rows_per_second(&self) -> f64 {
        if self.processing_time.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.processing_time.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate unit success rate percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.snapshots_written + self.units_failed;
        if attempted > 0 {
            (self.snapshots_written as f64 / attempted as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Harvest Summary:\n\
             Regions: {} resolved, {} failed\n\
             Worlds: {} discovered, {} server rows\n\
             Snapshots: {} written, {} skipped, {} failed ({:.1}% success rate)\n\
             Rows: {} written, {} dropped\n\
             Performance: {:.1} snapshots/sec, {:.0} rows/sec\n\
             Duration: {:.2}s",
            self.regions_resolved,
            self.regions_failed,
            self.worlds_discovered,
            self.server_rows,
            self.snapshots_written,
            self.units_skipped,
            self.units_failed,
            self.success_rate(),
            self.rows_written,
            self.rows_dropped,
            self.snapshots_per_second(),
            self.rows_per_second(),
            self.processing_time.as_secs_f64()
        )
    }
}
