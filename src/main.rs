use clap::Parser;
use corrosion_rawdata::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(stats) if stats.is_success() => process::exit(0),
        Ok(stats) => {
            // Failures have already been reported by the command
            eprintln!("Error: {} sheet(s) failed to load", stats.files_failed());
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Corrosion Rawdata - Laboratory Corrosion Sheet Loader");
    println!("=====================================================");
    println!();
    println!("Load CSV exports of laboratory corrosion sheets (impedance, LPR and");
    println!("Tafel fit results) into typed sample records of the sample data model.");
    println!();
    println!("USAGE:");
    println!("    corrosion-rawdata <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    load        Load sheets and report the assembled samples");
    println!("    schema      Print the sample data model schema as JSON");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Load the standard laboratory sheet export:");
    println!("    corrosion-rawdata load --lab-sheet rawdata.csv");
    println!();
    println!("    # Load every sheet below a directory and save the collections:");
    println!("    corrosion-rawdata load sheets/ --output samples.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    corrosion-rawdata <COMMAND> --help");
}
