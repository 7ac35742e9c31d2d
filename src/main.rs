use clap::Parser;
use mpcorb_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // Without a subcommand, show help and the available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(mpcorb_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("MPCORB Processor - Minor Planet Center Orbit Catalog Decoder");
    println!("============================================================");
    println!();
    println!("Decode MPCORB.DAT orbital-element catalogs (plain or gzip-compressed)");
    println!("into typed minor-planet records.");
    println!();
    println!("USAGE:");
    println!("    mpcorb-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    list        Decode a catalog and print its records");
    println!("    validate    Decode a catalog and report records that fail");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Print id:designation for every record:");
    println!("    mpcorb-processor list MPCORB.DAT.gz");
    println!();
    println!("    # First 100 records as JSON lines:");
    println!("    mpcorb-processor list MPCORB.DAT --format json --limit 100");
    println!();
    println!("    # Check a catalog with 8 workers:");
    println!("    mpcorb-processor validate MPCORB.DAT -j 8");
    println!();
    println!("For detailed help on any command, use:");
    println!("    mpcorb-processor <COMMAND> --help");
}
