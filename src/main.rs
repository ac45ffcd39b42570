use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gravity_duel::config::SimConfig;
use gravity_duel::runner::{self, Session, TracingSink};
use gravity_duel::script::InputScript;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Gravity Duel v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration; a script path on the command line wins over INPUT_SCRIPT
    let mut config = SimConfig::load_or_default();
    if let Some(path) = std::env::args().nth(1) {
        config.input_script = Some(PathBuf::from(path));
    }
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: {} Hz, realtime={}, auto_restart={}, max_ticks={}",
        config.tick_rate, config.realtime, config.auto_restart, config.max_ticks
    );

    let script = match &config.input_script {
        Some(path) => InputScript::load(path)
            .with_context(|| format!("failed to load input script {}", path.display()))?,
        None => {
            warn!("No input script given, players will stand still");
            InputScript::default()
        }
    };
    match script.last_tick() {
        Some(last_tick) => info!(
            "Loaded {} scripted key events up to tick {}",
            script.len(),
            last_tick
        ),
        None => info!("Loaded an empty input script"),
    }

    let mut session = Session::new(&config, script);
    let mut sink = TracingSink;

    let summary = if config.realtime {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };
        runner::run_realtime(&mut session, &mut sink, shutdown).await
    } else {
        runner::run_headless(&mut session, &mut sink)
    };

    info!(
        "Stopped after {} ticks ({:?}), {} match(es) finished",
        summary.ticks,
        summary.stop_reason,
        summary.results.len()
    );

    let report = serde_json::json!({
        "summary": summary,
        "final_state": session.game().state(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to encode final report")?
    );

    Ok(())
}
