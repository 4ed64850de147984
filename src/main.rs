use clap::Parser;
use dga_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.get_command() else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(command) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(dga_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                )
                .into())
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
    println!("DGA Processor - Transformer Oil Diagnostics");
    println!("===========================================");
    println!();
    println!("Scores transformer oil samples for risk and classifies their fault type");
    println!("with a simplified Duval Triangle 1 and a ternary gas-ratio method.");
    println!();
    println!("USAGE:");
    println!("    dga-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    analyze     Load oil test exports, classify and report (main command)");
    println!("    demo        Run the report on the built-in demo samples");
    println!("    gases       Classify a single set of gas concentrations");
    println!("    config      Print the effective configuration as TOML");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Analyze every CSV under a directory:");
    println!("    dga-processor analyze ./exports");
    println!();
    println!("    # High-risk samples of one station, exported to Parquet:");
    println!("    dga-processor analyze 'exports/*.csv' --station HEMATI --min-risk 60 \\");
    println!("                          --output report --format parquet");
    println!();
    println!("    # Classify one gas set:");
    println!("    dga-processor gases --ch4 1126 --c2h6 525 --c2h4 1669 --c2h2 8");
    println!();
    println!("For detailed help on any command, use:");
    println!("    dga-processor <COMMAND> --help");
}
