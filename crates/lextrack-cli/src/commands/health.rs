//! Case health report command
//!
//! Usage: lextrack health <CASE_ID> --user <ID> [--db <PATH>]

use std::path::PathBuf;

use clap::Args;

use lextrack_engine::commands::timeline::case_health;

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Case id to report on
    pub case_id: String,

    /// Owner id
    #[arg(long)]
    pub user: String,

    /// Database file path
    #[arg(long, default_value = "lextrack.db")]
    pub db: PathBuf,
}

/// Execute health report
pub fn execute(args: HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = lextrack_store::db::open(&args.db)?;

    let report = case_health(&conn, &args.user, &args.case_id)?;

    println!("Case health for {}", args.case_id);
    println!("  score:            {}/100", report.score);
    println!("  est. time saved:  {} minutes", report.estimated_time_saved);
    println!("  documents:        {}", report.counters.documents_generated);
    println!("  AI assists:       {}", report.counters.ai_assists);
    println!("  uploads:          {}", report.counters.files_uploaded);
    println!("  timeline entries: {}", report.counters.timeline_entries);
    Ok(())
}
