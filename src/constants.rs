//! Application constants for the Tribal Wars harvester
//!
//! This module contains all endpoint paths, default values, snapshot layout
//! names and column mappings used throughout the harvester application.

// =============================================================================
// Regional Portals and Directory Endpoint
// =============================================================================

/// Regional portal domains harvested when none are specified
pub const DEFAULT_REGIONS: &[&str] = &["tribalwars.com.pt", "die-staemme.de", "tribalwars.com.br"];

/// Path of the server directory endpoint on every regional portal
pub const SERVER_DIRECTORY_PATH: &str = "/backend/get_servers.php";

// =============================================================================
// Snapshot Layout
// =============================================================================

/// Root directory name for all harvested data
pub const DATA_DIR_NAME: &str = "data";

/// Directory name for the cross-region server table
pub const SERVER_DATA_DIR: &str = "server-data";

/// Filename of the cross-region server table
pub const SERVER_DATA_FILENAME: &str = "server_data.json";

/// Date format used for snapshot directories and the datetime column
pub const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of world snapshot files
pub const SNAPSHOT_EXTENSION: &str = "json";

// =============================================================================
// Harvest Configuration Defaults
// =============================================================================

/// Default HTTP timeout per request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every portal request
pub const DEFAULT_USER_AGENT: &str = concat!("tw-harvester/", env!("CARGO_PKG_VERSION"));

/// Upper bound on concurrent world/kind work units
pub const MAX_PARALLEL_WORKERS: usize = 32;

/// Field delimiter of the positional map exports
pub const FIELD_DELIMITER: char = ',';

/// Default number of concurrent work units, derived from the host CPU count
pub fn default_worker_count() -> usize {
    num_cpus::get().clamp(1, MAX_PARALLEL_WORKERS)
}

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names shared by the snapshot schemas
pub mod columns {
    // Stamp columns appended to every record
    pub const DATETIME: &str = "datetime";
    pub const SERVER: &str = "server";

    // Identifier columns
    pub const VILLAGE_ID: &str = "village_id";
    pub const PLAYER_ID: &str = "player_id";
    pub const ALLY_ID: &str = "ally_id";

    // Village columns
    pub const NAME: &str = "name";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const CONTINENT: &str = "continent";
    pub const POINTS: &str = "points";

    // Player and alliance columns
    pub const NUM_VILLAGES: &str = "num_villages";
    pub const RANK: &str = "rank";
    pub const TAG: &str = "tag";
    pub const MEMBERS: &str = "members";
    pub const TOTAL_POINTS: &str = "total_points";

    // Server table columns
    pub const URL: &str = "url";
    pub const REGION: &str = "region";
    pub const REGION_NAME: &str = "region_name";
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build the server directory URL for a regional portal
///
/// Bare domains are addressed over plain HTTP and rely on the portal's
/// redirect; specs that already carry a scheme are used as-is so local
/// endpoints can stand in during tests.
pub fn server_directory_url(region: &str) -> String {
    if region.starts_with("http://") || region.starts_with("https://") {
        format!("{}{}", region.trim_end_matches('/'), SERVER_DIRECTORY_PATH)
    } else {
        format!("http://{}{}", region, SERVER_DIRECTORY_PATH)
    }
}

/// Get the snapshot filename for a world code
pub fn snapshot_filename(world_code: &str) -> String {
    format!("{}.{}", world_code, SNAPSHOT_EXTENSION)
}
