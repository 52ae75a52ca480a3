use clap::Parser;
use std::process;
use tw_harvester::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command until completion or CTRL+C
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(tw_harvester::Error::interrupted(
                    "harvest interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - the report has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("TW Harvester - Tribal Wars World Data Harvester");
    println!("===============================================");
    println!();
    println!("Harvest village, player, alliance and ranking data from public");
    println!("Tribal Wars map endpoints into dated newline-delimited JSON snapshots.");
    println!();
    println!("USAGE:");
    println!("    tw-harvester <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    harvest     Harvest snapshots for every world of the configured regions");
    println!("    worlds      Resolve server directories and list announced worlds");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Harvest the default regions into ./data:");
    println!("    tw-harvester harvest");
    println!();
    println!("    # Harvest one region into a custom directory, backdated:");
    println!("    tw-harvester harvest --regions die-staemme.de --output /srv/tw \\");
    println!("                         --date 2024-03-01");
    println!();
    println!("    # List announced worlds as JSON:");
    println!("    tw-harvester worlds --format json");
    println!();
    println!("    # Get help for specific commands:");
    println!("    tw-harvester harvest --help");
    println!("    tw-harvester worlds --help");
    println!();
    println!("For detailed help on any command, use:");
    println!("    tw-harvester <COMMAND> --help");
}
