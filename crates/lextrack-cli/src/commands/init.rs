//! Database initialization command
//!
//! Usage: lextrack init [--db <PATH>]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Database file path
    #[arg(long, default_value = "lextrack.db")]
    pub db: PathBuf,
}

/// Execute init: open (creating if needed), configure, migrate
pub fn execute(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = lextrack_store::db::open(&args.db)?;
    lextrack_store::db::configure(&conn)?;
    lextrack_store::migrations::apply_migrations(&mut conn)?;

    println!("✓ Database ready at {}", args.db.display());
    Ok(())
}
