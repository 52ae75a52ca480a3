//! Worlds command implementation for the harvester CLI
//!
//! Resolves the server directory of every configured region and lists the
//! announced worlds without harvesting anything.

use super::shared::setup_worlds_logging;
use crate::app::services::fetch::EndpointClient;
use crate::app::services::world_directory::{self, RegionDirectory};
use crate::cli::args::{OutputFormat, WorldsArgs};
use crate::constants::DEFAULT_USER_AGENT;
use crate::{Error, Result};
use colored::*;
use tracing::{debug, error, info};

/// Worlds command runner
///
/// Resolves each configured region's directory endpoint and prints the
/// announced worlds. A region that cannot be resolved is reported and
/// skipped; the command only fails when no region resolves at all.
pub async fn run_worlds(args: WorldsArgs) -> Result<()> {
    // Set up logging
    setup_worlds_logging(&args)?;

    info!("Resolving world directories");
    debug!("Command line arguments: {:?}", args);

    let client = EndpointClient::new(args.timeout_secs, DEFAULT_USER_AGENT)?;

    let mut directories = Vec::new();
    let mut regions_failed = 0usize;
    for region in args.get_regions() {
        match world_directory::resolve_region(&client, &region).await {
            Ok(directory) => directories.push(directory),
            Err(e) => {
                error!("Failed to resolve region '{}': {}", region, e);
                regions_failed += 1;
            }
        }
    }

    if directories.is_empty() {
        return Err(Error::configuration(format!(
            "no region directory could be resolved ({} failed)",
            regions_failed
        )));
    }

    match args.output_format {
        OutputFormat::Human => print_human_listing(&directories, regions_failed),
        OutputFormat::Json => print_json_listing(&directories),
    }

    Ok(())
}

/// Print a colored world listing, one block per region
fn print_human_listing(directories: &[RegionDirectory], regions_failed: usize) {
    println!("{}", "Announced Tribal Wars worlds:".bright_green().bold());

    for directory in directories {
        println!(
            "\n{} {}",
            directory.region.bright_cyan().bold(),
            format!("({} worlds)", directory.len()).bright_white()
        );

        for (i, row) in directory.rows.iter().enumerate() {
            let index = format!("{}.", i + 1);
            match row.url.as_deref() {
                Some(url) => println!(
                    "  {} {} {}",
                    index.bright_yellow().bold(),
                    row.server,
                    url.bright_white()
                ),
                None => println!(
                    "  {} {} {}",
                    index.bright_yellow().bold(),
                    row.server,
                    "(no url announced)".bright_red()
                ),
            }
        }
    }

    if regions_failed > 0 {
        println!(
            "\n{}",
            format!("Regions failed: {}", regions_failed).bright_red()
        );
    }
}

/// Print the listing as a JSON array for machine consumption
fn print_json_listing(directories: &[RegionDirectory]) {
    let listing: Vec<_> = directories
        .iter()
        .map(|directory| {
            serde_json::json!({
                "region": &directory.region,
                "worlds": &directory.rows,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&listing).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ServerRow;

    fn sample_directories() -> Vec<RegionDirectory> {
        vec![
            RegionDirectory::new(
                "tribalwars.com.pt",
                vec![
                    ServerRow {
                        server: "pt92".to_string(),
                        url: Some("https://pt92.tribalwars.com.pt".to_string()),
                        region: Some("PT".to_string()),
                        region_name: Some("Portugal".to_string()),
                    },
                    ServerRow {
                        server: "pts1".to_string(),
                        url: None,
                        region: Some("PT".to_string()),
                        region_name: Some("Portugal".to_string()),
                    },
                ],
            ),
            RegionDirectory::new("die-staemme.de", vec![]),
        ]
    }

    #[test]
    fn test_print_human_listing() {
        // Should not panic, with and without failures
        print_human_listing(&sample_directories(), 0);
        print_human_listing(&sample_directories(), 2);
    }

    #[test]
    fn test_print_json_listing() {
        // Should not panic
        print_json_listing(&sample_directories());
    }
}
