//! Directory payload scanning and world-code pairing

use crate::app::models::ServerRow;
use crate::app::services::fetch::EndpointClient;
use crate::app::services::world_directory::{RegionDirectory, regions};
use crate::constants::server_directory_url;
use crate::{Error, Result};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Quoted string literals announced by the directory endpoint
static QUOTED_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.+?)""#).unwrap());

/// Resolve the active worlds of one regional portal
///
/// Fetches the portal's directory endpoint and pairs its payload into server
/// rows. Directories are never cached; every run resolves afresh.
pub async fn resolve_region(client: &EndpointClient, region: &str) -> Result<RegionDirectory> {
    let url = server_directory_url(region);
    let body = client.fetch_text(&url).await?;
    let rows = parse_directory_payload(&url, &body)?;
    debug!("Resolved {} worlds for region '{}'", rows.len(), region);
    Ok(RegionDirectory::new(region, rows))
}

/// Pair the quoted tokens of a directory payload into server rows
///
/// The payload is a flat alternating sequence of world-code and base-URL
/// string literals. Tokens are grouped into consecutive pairs; an odd
/// trailing code keeps its row with an absent URL instead of failing.
/// Duplicate codes collapse to the last announced URL while keeping their
/// first position.
pub fn parse_directory_payload(url: &str, body: &str) -> Result<Vec<ServerRow>> {
    let tokens: Vec<&str> = QUOTED_TOKEN
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if tokens.is_empty() {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        return Err(Error::directory_parse(
            url,
            "payload contains no quoted server tokens",
        ));
    }

    let mut paired: IndexMap<&str, Option<&str>> = IndexMap::new();
    for pair in tokens.chunks(2) {
        paired.insert(pair[0], pair.get(1).copied());
    }

    Ok(paired
        .into_iter()
        .map(|(code, world_url)| server_row(code, world_url))
        .collect())
}

/// Build one server table row from a directory pair
fn server_row(code: &str, url: Option<&str>) -> ServerRow {
    let region = regions::region_code(code);
    let region_name = region
        .as_deref()
        .and_then(regions::region_display_name)
        .map(str::to_string);
    ServerRow {
        server: code.to_string(),
        url: url.map(str::to_string),
        region,
        region_name,
    }
}
