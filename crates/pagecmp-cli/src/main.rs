//! pagecmp CLI
//!
//! Command-line interface for comparing two saved HTML pages

use clap::{Parser, Subcommand};
use pagecmp_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pagecmp")]
#[command(about = "pagecmp - Content differences between two web pages", long_about = None)]
struct Cli {
    /// Logging profile (dev, prod, test); logging is off when omitted
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare a source page against a current page
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
