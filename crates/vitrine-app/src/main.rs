use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vitrine_core::EngineConfig;
use vitrine_platform::{FxError, Result};

mod demo;
mod runner;
mod session;

use session::Session;

/// Replay a scripted browsing session against the headless site
#[derive(Parser, Debug)]
#[command(name = "vitrine-app")]
#[command(version)]
#[command(allow_missing_positional = true)]
struct Args {
    /// Engine config (.toml or .json); defaults apply when omitted
    config: Option<PathBuf>,

    /// Session script (.json)
    session: PathBuf,
}

fn run_app(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let session = Session::load(&args.session)?;
    info!(
        "replaying {} ({} events)",
        args.session.display(),
        session.events.len()
    );

    let report = runner::run(config, &session)?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| FxError::Platform(format!("report serialization: {e}")))?;
    println!("{json}");
    Ok(())
}

fn main() {
    // Init logging; stdout carries the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let args = Args::parse();

    info!("Vitrine starting");
    if let Err(e) = run_app(args) {
        eprintln!("Vitrine error: {e}");
        std::process::exit(1);
    }
}
