//! Track idle detection service - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Classifies tracks as idle or active from a stream of position reports.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via TRACKWATCH_CONFIG)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    trackwatch_telemetry::init_logging()?;

    info!("Starting trackwatch v{}", env!("CARGO_PKG_VERSION"));

    let config = trackwatch_service::AppConfig::load(args.config)?;
    info!(
        mode = ?config.detector.notification_mode,
        idle_limit_secs = config.detector.idle_limit_secs,
        tolerance_feet = config.detector.tolerance_feet,
        "Configuration loaded"
    );

    let app = trackwatch_service::Application::new(config)?;
    app.run().await?;

    Ok(())
}
