//! HTF Scanner - MEXC futures confluence and squeeze alerts
//!
//! Polls the MEXC contract tickers, evaluates the day's strongest gainers on
//! daily and weekly history and pushes triggered setups to Telegram.
//!
//! # Usage
//! ```sh
//! TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... cargo run
//! cargo run -- --once --dry-run --symbols BTC_USDT,ETH_USDT
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use htf_scanner::application::{MarketScanner, ScannerSettings};
use htf_scanner::config::{Config, load_detector_config};
use htf_scanner::domain::ports::{AlertSink, MarketDataService};
use htf_scanner::infrastructure::{
    LogAlertSink, MexcMarketDataService, ScanMetrics, TelegramAlertSink,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Multi-timeframe confluence and squeeze scanner", long_about = None)]
struct Cli {
    /// Run a single scan and exit
    #[arg(long)]
    once: bool,

    /// Comma-separated symbols to scan instead of the gainer list
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Log alerts instead of sending them to Telegram
    #[arg(long)]
    dry_run: bool,

    /// Detector thresholds TOML (overrides DETECTOR_CONFIG_PATH)
    #[arg(long)]
    detector_config: Option<PathBuf>,
}

fn build_sink(config: &Config, dry_run: bool) -> Arc<dyn AlertSink> {
    if dry_run {
        info!("Dry run: alerts are logged only");
        return Arc::new(LogAlertSink);
    }

    match config.notifier.telegram_credentials() {
        Some((token, chat_id)) => Arc::new(TelegramAlertSink::new(
            config.notifier.api_url.clone(),
            token.to_string(),
            chat_id.to_string(),
            config.exchange.http_settings(),
        )),
        None => {
            warn!("TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID not set: alerts are logged only");
            Arc::new(LogAlertSink)
        }
    }
}

fn scanner_settings(config: &Config, cli: &Cli) -> ScannerSettings {
    let mut settings = ScannerSettings::from(&config.scanner);
    settings.symbols = cli
        .symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    settings
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("HTF Scanner {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    let detector_path = cli
        .detector_config
        .clone()
        .or_else(|| config.detector_config_path.clone());
    let detector_config = load_detector_config(detector_path.as_deref())?;

    let settings = scanner_settings(&config, &cli);
    info!(
        "Configuration loaded: Exchange={}, Interval={:?}, Gainers>={}%, Timeframes={}/{}",
        config.exchange.base_url,
        settings.scan_interval,
        settings.min_gainer_pct,
        settings.daily_timeframe,
        settings.weekly_timeframe
    );
    if !settings.symbols.is_empty() {
        info!("Fixed symbol list: {:?}", settings.symbols);
    }

    let market: Arc<dyn MarketDataService> = Arc::new(
        MexcMarketDataService::builder()
            .base_url(config.exchange.base_url.clone())
            .kline_limit(config.exchange.kline_limit)
            .http(config.exchange.http_settings())
            .build(),
    );
    let sink = build_sink(&config, cli.dry_run);
    let metrics = ScanMetrics::new().context("Failed to register metrics")?;

    let scanner = MarketScanner::new(market, sink, detector_config, settings).with_metrics(metrics);

    if cli.once {
        let summary = scanner.scan_once().await?;
        info!(
            "Scan complete: {} candidates, {} evaluated, {} alerts",
            summary.candidates, summary.evaluated, summary.alerts_sent
        );
        return Ok(());
    }

    scanner.notify_startup().await;

    info!("Scanner running. Press Ctrl+C to shutdown.");
    tokio::select! {
        _ = scanner.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
