#![forbid(unsafe_code)]

//! `blt-kitchen` — cooperative sandwich orchestration demo.
//!
//! Presses the trigger once (or `--presses` times) on a single-threaded event
//! loop, printing every station notification as it is marshaled to stdout,
//! then waits for all background work before exiting.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use blt_kitchen::display::{self, OutputSink, StdoutView};
use blt_kitchen::event_loop::EventLoop;
use blt_kitchen::kitchen::Kitchen;
use blt_kitchen::orchestrator::handler::Orchestrator;
use blt_kitchen::orchestrator::supervisor::Supervisor;
use blt_kitchen::orchestrator::worker::make_sandwich_blocking;
use blt_kitchen::{AppError, KitchenConfig, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "blt-kitchen", about = "Cook a BLT without blocking the cook", version, long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the number of toast slices.
    #[arg(long)]
    toast: Option<u32>,

    /// Override the number of bacon slices.
    #[arg(long)]
    bacon: Option<u32>,

    /// How many times to press the trigger.
    #[arg(long, default_value_t = 1)]
    presses: u32,

    /// Block for the sandwich on a dedicated worker thread instead.
    #[arg(long)]
    blocking: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    let mut config = match &args.config {
        Some(path) => KitchenConfig::load_from_path(path)?,
        None => KitchenConfig::default(),
    };
    if let Some(toast) = args.toast {
        config.toast_slices = toast;
    }
    if let Some(bacon) = args.bacon {
        config.bacon_slices = bacon;
    }
    info!(?config, "configuration loaded");

    EventLoop::new()?.run(run(args, config))
}

async fn run(args: Cli, config: KitchenConfig) -> Result<()> {
    let (sink, pump) = display::channel();
    let printer = tokio::task::spawn_local(pump.run(StdoutView));

    let outcome = if args.blocking {
        run_blocking(&config, sink.clone()).await
    } else {
        run_presses(&config, sink.clone(), args.presses).await
    };

    sink.flush().await?;
    drop(sink);
    if printer.await.is_err() {
        warn!("display pump did not exit cleanly");
    }
    outcome
}

async fn run_presses(config: &KitchenConfig, sink: OutputSink, presses: u32) -> Result<()> {
    let supervisor = Supervisor::new(sink.clone());
    let failures = {
        let kitchen = Kitchen::new(config, sink, supervisor.clone());
        let orchestrator = Orchestrator::new(kitchen, config);
        for _ in 0..presses {
            orchestrator.on_triggered();
        }

        tokio::select! {
            () = supervisor.shutdown() => {}
            () = shutdown_signal() => {
                info!("interrupt received; cancelling orders");
                orchestrator.kitchen().cancel_all();
                supervisor.shutdown().await;
            }
        }
        supervisor.failures()
    };
    drop(supervisor);

    match failures.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

async fn run_blocking(config: &KitchenConfig, sink: OutputSink) -> Result<()> {
    let worker_config = config.clone();
    let worker_sink = sink.clone();
    let sandwich = tokio::task::spawn_blocking(move || {
        make_sandwich_blocking(&worker_config, worker_sink)
    })
    .await
    .map_err(|_| AppError::TaskPanicked("blocking caller".into()))??;
    sink.append_line(format!("Your {sandwich} is done!"));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "ctrl-c signal handler failed");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
