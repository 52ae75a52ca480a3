//! World directory service for resolving a region's active game worlds
//!
//! Every regional portal announces its active worlds on a directory endpoint
//! as a flat sequence of alternating quoted world-code and base-URL string
//! literals. This service scans and pairs those tokens, derives the region
//! columns of the cross-region server table and expands directory rows into
//! fetchable game worlds.

use crate::app::models::{GameWorld, ServerRow};
use tracing::warn;

pub mod directory;
pub mod regions;

#[cfg(test)]
pub mod tests;

// Re-export key functions for convenience
pub use directory::{parse_directory_payload, resolve_region};
pub use regions::{region_code, region_display_name};

/// Active-world listing of one regional portal
///
/// Rows keep the portal's announcement order. Duplicate world codes are
/// collapsed to the last announced URL, matching the directory contract.
#[derive(Debug, Clone)]
pub struct RegionDirectory {
    /// Region spec the directory was resolved from
    pub region: String,

    /// One row per announced world
    pub rows: Vec<ServerRow>,
}

impl RegionDirectory {
    /// Create a directory from parsed server rows
    pub fn new(region: impl Into<String>, rows: Vec<ServerRow>) -> Self {
        Self {
            region: region.into(),
            rows,
        }
    }

    /// Number of announced worlds
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the portal announced no worlds
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expand directory rows into fetchable worlds
    ///
    /// Rows without a base URL (a dangling trailing token) cannot be fetched
    /// and are skipped with a warning. Row order is preserved.
    pub fn worlds(&self) -> Vec<GameWorld> {
        self.rows
            .iter()
            .filter_map(|row| match row.url.as_deref() {
                Some(url) => match GameWorld::new(&row.server, url) {
                    Ok(world) => Some(world),
                    Err(e) => {
                        warn!("Skipping directory row '{}': {}", row.server, e);
                        None
                    }
                },
                None => {
                    warn!("Skipping directory row '{}' without a url", row.server);
                    None
                }
            })
            .collect()
    }
}
