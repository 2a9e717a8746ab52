//! Demo data seeding
//!
//! Usage: lextrack seed [--db <PATH>] [--user <ID>]
//!
//! Creates a handful of cases with realistic activity for local development.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::Args;

use lextrack_core::model::{CasePatch, CaseStatus, CaseType, Priority};
use lextrack_engine::commands::artifacts::{
    chat_log, draft_create, note_add, upload_record, Actor, DraftRequest,
};
use lextrack_engine::commands::case::{case_create, case_update};

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Database file path
    #[arg(long, default_value = "lextrack.db")]
    pub db: PathBuf,

    /// Owner id for the seeded cases
    #[arg(long, default_value = "demo-user")]
    pub user: String,
}

/// Execute seed
pub fn execute(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = lextrack_store::db::open(&args.db)?;
    lextrack_store::db::configure(&conn)?;
    lextrack_store::migrations::apply_migrations(&mut conn)?;

    let actor = Actor::authenticated(args.user.clone());

    let recovery = case_create(
        &conn,
        &args.user,
        "Sharma v. Verma",
        CasePatch {
            case_type: Some(CaseType::Civil),
            court: Some("Delhi High Court".to_string()),
            cnr_number: Some("DLHC010012342023".to_string()),
            petitioner: Some("Rakesh Sharma".to_string()),
            respondent: Some("Anil Verma".to_string()),
            priority: Some(Priority::High),
            ..Default::default()
        },
    )?;
    case_update(
        &conn,
        &args.user,
        &recovery.id,
        CasePatch {
            status: Some(CaseStatus::Hearing),
            next_hearing: Some(Utc::now() + Duration::days(12)),
            ..Default::default()
        },
    )?;
    note_add(
        &conn,
        &actor,
        &recovery.id,
        "Client to produce the original rent receipts before the next date.",
    )?;
    upload_record(
        &conn,
        &actor,
        &recovery.id,
        "rent-receipts-2024.pdf",
        Some("application/pdf".to_string()),
        Some(482_133),
    )?;
    chat_log(
        &conn,
        &actor,
        &recovery.id,
        "What is the limitation period for recovery of rent arrears?",
        "Three years from when the arrears fall due (Article 52, Limitation Act 1963).",
    );

    let cheque = case_create(
        &conn,
        &args.user,
        "Mehta v. Apex Traders",
        CasePatch {
            case_type: Some(CaseType::ChequeBounce),
            court: Some("Saket District Court".to_string()),
            priority: Some(Priority::Medium),
            ..Default::default()
        },
    )?;
    let mut inputs = BTreeMap::new();
    inputs.insert("recipient".to_string(), "M/s Apex Traders".to_string());
    inputs.insert(
        "subject".to_string(),
        "Dishonour of cheque no. 004512".to_string(),
    );
    inputs.insert("deadline".to_string(), "15".to_string());
    draft_create(
        &conn,
        &actor,
        DraftRequest {
            draft_type: "legal_notice".to_string(),
            inputs,
            title: None,
            case_id: Some(cheque.id.clone()),
        },
    )?;

    let archived = case_create(
        &conn,
        &args.user,
        "Estate of Gupta (probate)",
        CasePatch {
            case_type: Some(CaseType::Family),
            ..Default::default()
        },
    )?;
    case_update(
        &conn,
        &args.user,
        &archived.id,
        CasePatch {
            status: Some(CaseStatus::Disposed),
            ..Default::default()
        },
    )?;

    println!("✓ Seeded 3 cases for {}", args.user);
    println!("  {}  Sharma v. Verma", recovery.id);
    println!("  {}  Mehta v. Apex Traders", cheque.id);
    println!("  {}  Estate of Gupta (probate)", archived.id);
    Ok(())
}
