//! LexTrack CLI
//!
//! Command-line interface for the LexTrack backend

use clap::{Parser, Subcommand};

use lextrack_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lextrack")]
#[command(about = "LexTrack - legal case management backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init(commands::init::InitArgs),
    /// Load demo data into the database
    Seed(commands::seed::SeedArgs),
    /// Print a case health report
    Health(commands::health::HealthArgs),
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(_) => init(Profile::Production),
        _ => init(Profile::Development),
    }

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args),
        Commands::Seed(args) => commands::seed::execute(args),
        Commands::Health(args) => commands::health::execute(args),
        Commands::Serve(args) => commands::serve::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
