//! # olympus_app — Fleet driver
//!
//! Runs a fleet of simulated Olympus 593 engines through a fixed tick loop
//! and prints their reports.
//!
//! ## Startup Sequence
//!
//! 1. Initialise structured logging (`RUST_LOG`, default `info`).
//! 2. Resolve the run configuration: defaults, then `--config`, then flags.
//! 3. Build the fleet and run the tick loop on a blocking thread.
//! 4. On Ctrl-C, finish the current tick and stop every engine.

mod config;
mod fleet;
mod output;
mod tick;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use olympus_engine::ThreadPacer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Overrides, RunConfig};
use fleet::Fleet;
use output::{JsonSink, ReportSink, TextSink};
use tick::{FleetLoop, TickConfig};

#[derive(Parser)]
#[command(
    name = "olympus_app",
    about = "Simulate a fleet of Olympus 593 jet engines"
)]
struct Args {
    /// Path to a TOML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

impl Args {
    fn resolve(&self) -> Result<RunConfig> {
        let base = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => RunConfig::default(),
        };
        let config = base.with_overrides(&self.overrides);
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only reports.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve()?;

    info!(
        engines = config.engine_count,
        ticks = config.ticks,
        json = config.json,
        "olympus fleet starting"
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let watcher = {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping fleet");
                shutdown.store(true, Ordering::SeqCst);
            }
        })
    };

    let summary = tokio::task::spawn_blocking(move || {
        let fleet = Fleet::new(config.engine_count, config.spool_delay());
        let mut fleet_loop = FleetLoop::new(TickConfig::from(&config), fleet);

        let stdout = std::io::stdout().lock();
        let mut sink: Box<dyn ReportSink> = if config.json {
            Box::new(JsonSink::new(stdout))
        } else {
            Box::new(TextSink::new(stdout))
        };

        let summary = fleet_loop.run(&ThreadPacer, &shutdown, sink.as_mut())?;
        for engine in fleet_loop.fleet().iter() {
            let life = engine.lifetimes();
            info!(
                engine_id = life.engine_id,
                operating_time_h = life.operating_time_h,
                engine_life_remaining_h = life.engine_h,
                "final engine hours"
            );
        }
        Ok::<_, std::io::Error>(summary)
    })
    .await
    .context("fleet loop thread panicked")??;

    watcher.abort();

    info!(
        ticks = summary.ticks,
        rejected = summary.rejected_commands,
        interrupted = summary.interrupted,
        "olympus fleet shut down"
    );
    Ok(())
}
