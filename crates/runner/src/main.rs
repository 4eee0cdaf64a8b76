use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use vwap_runner::{ReplaySession, RunnerConfig};
use vwap_strategy::{DriverOutcome, VwapConfig};

#[derive(Parser, Debug)]
#[command(name = "vwap-runner", about = "Replay a VWAP execution over a CSV bar history")]
struct Cli {
    /// JSON execution config
    #[arg(short, long)]
    config: PathBuf,
    /// CSV bars: datetime,open,high,low,close,volume
    #[arg(long)]
    history: PathBuf,
    /// Lots the simulator fills per tick
    #[arg(long, default_value_t = 1)]
    lot_step: i64,
    /// Milliseconds between live bars
    #[arg(long, default_value_t = 10)]
    pace_ms: u64,
    /// Milliseconds allowed for fills after the last bar
    #[arg(long, default_value_t = 1000)]
    grace_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let vwap = VwapConfig::from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    info!("{}", vwap.description());

    let config = RunnerConfig::new(vwap, &cli.history)
        .with_lot_step(cli.lot_step)
        .with_pace_ms(cli.pace_ms)
        .with_grace_ms(cli.grace_ms);
    let report = ReplaySession::new(config)
        .run_from_file()
        .await
        .context("replay failed")?;

    if let Some(schedule) = &report.schedule {
        info!("Schedule:\n{}", schedule);
    }
    match report.outcome {
        DriverOutcome::Done => info!("Target {} reached", report.committed),
        DriverOutcome::Cancelled => info!(
            "Cancelled at position {} of committed {}",
            report.position.net(),
            report.committed
        ),
    }
    Ok(())
}
