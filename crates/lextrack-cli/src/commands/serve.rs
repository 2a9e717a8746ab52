//! HTTP API server command
//!
//! Usage: lextrack serve [--db <PATH>] [--bind <ADDR>] [--token <TOK=USER>]...
//!
//! The AI backend is configured through LEXTRACK_AI_ENDPOINT and
//! LEXTRACK_AI_KEY; without a key the server refuses to start rather than
//! serving features that would fail on first use.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Args;

use lextrack_api::ai::HttpAiService;
use lextrack_api::auth::{AuthUser, Plan, StaticTokenAuth};
use lextrack_api::{router, AppState};

const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Database file path
    #[arg(long, default_value = "lextrack.db")]
    pub db: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Static bearer tokens, TOKEN=USER_ID (repeatable); tokens get the PRO tier
    #[arg(long = "token", value_name = "TOKEN=USER_ID")]
    pub tokens: Vec<String>,
}

/// Execute serve
pub fn execute(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = lextrack_store::db::open(&args.db)?;
    lextrack_store::db::configure(&conn)?;
    lextrack_store::migrations::apply_migrations(&mut conn)?;

    let mut auth = StaticTokenAuth::new();
    for pair in &args.tokens {
        let (token, user_id) = pair
            .split_once('=')
            .ok_or_else(|| format!("invalid --token value '{pair}', expected TOKEN=USER_ID"))?;
        auth = auth.with_token(
            token,
            AuthUser {
                id: user_id.to_string(),
                plan: Plan::Pro,
            },
        );
    }

    let endpoint = std::env::var("LEXTRACK_AI_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_AI_ENDPOINT.to_string());
    let api_key = std::env::var("LEXTRACK_AI_KEY")
        .map_err(|_| "LEXTRACK_AI_KEY is not set; the AI features need a completion backend")?;

    let state = AppState::new(
        Arc::new(Mutex::new(conn)),
        Arc::new(auth),
        Arc::new(HttpAiService::new(endpoint, api_key)),
    );
    let app = router(state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&args.bind).await?;
        println!("✓ Listening on {}", args.bind);
        axum::serve(listener, app).await?;
        Ok::<(), std::io::Error>(())
    })?;

    Ok(())
}
