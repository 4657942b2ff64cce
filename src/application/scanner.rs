use crate::application::alerts::{
    STARTUP_MESSAGE, format_confluence_alert, format_squeeze_alert,
};
use crate::config::ScannerEnvConfig;
use crate::domain::market::{Timeframe, select_gainers};
use crate::domain::ports::{AlertSink, MarketDataService};
use crate::domain::signals::{
    ConfluenceResult, DetectorConfig, DetectorKind, SignalReport, SqueezeResult,
    detect_confluence, detect_squeeze,
};
use crate::infrastructure::observability::ScanMetrics;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{self, Duration};
use tracing::{debug, error, info};

/// Scheduling and selection knobs for [`MarketScanner`].
#[derive(Debug, Clone)]
pub struct ScannerSettings {
    pub scan_interval: Duration,
    pub min_gainer_pct: f64,
    pub symbol_pause: Duration,
    pub daily_timeframe: Timeframe,
    pub weekly_timeframe: Timeframe,
    pub confluence_enabled: bool,
    pub squeeze_enabled: bool,
    pub startup_notice: bool,
    /// Fixed symbol list; when empty the gainer filter picks symbols each scan
    pub symbols: Vec<String>,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(60),
            min_gainer_pct: 10.0,
            symbol_pause: Duration::from_millis(300),
            daily_timeframe: Timeframe::Day1,
            weekly_timeframe: Timeframe::Week1,
            confluence_enabled: true,
            squeeze_enabled: true,
            startup_notice: true,
            symbols: Vec::new(),
        }
    }
}

impl From<&ScannerEnvConfig> for ScannerSettings {
    fn from(config: &ScannerEnvConfig) -> Self {
        Self {
            scan_interval: Duration::from_secs(config.scan_interval_secs),
            min_gainer_pct: config.top_gainer_pct,
            symbol_pause: Duration::from_millis(config.symbol_pause_ms),
            daily_timeframe: config.daily_timeframe,
            weekly_timeframe: config.weekly_timeframe,
            confluence_enabled: config.confluence_enabled,
            squeeze_enabled: config.squeeze_enabled,
            startup_notice: config.startup_notice,
            symbols: Vec::new(),
        }
    }
}

/// Detector results for one symbol in one scan.
#[derive(Debug, Clone, Default)]
pub struct SymbolReport {
    pub symbol: String,
    pub confluence: Option<ConfluenceResult>,
    pub squeeze: Option<SqueezeResult>,
    pub alerts_sent: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub candidates: usize,
    pub evaluated: usize,
    pub alerts_sent: usize,
}

pub struct MarketScanner {
    market_service: Arc<dyn MarketDataService>,
    alert_sink: Arc<dyn AlertSink>,
    detector_config: DetectorConfig,
    settings: ScannerSettings,
    metrics: Option<ScanMetrics>,
}

impl MarketScanner {
    pub fn new(
        market_service: Arc<dyn MarketDataService>,
        alert_sink: Arc<dyn AlertSink>,
        detector_config: DetectorConfig,
        settings: ScannerSettings,
    ) -> Self {
        Self {
            market_service,
            alert_sink,
            detector_config,
            settings,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: ScanMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&ScanMetrics> {
        self.metrics.as_ref()
    }

    pub async fn notify_startup(&self) {
        if self.settings.startup_notice {
            self.alert_sink.send(STARTUP_MESSAGE).await;
        }
    }

    /// Symbols to evaluate this cycle, strongest gainers first.
    pub async fn select_symbols(&self) -> Result<Vec<String>> {
        if !self.settings.symbols.is_empty() {
            return Ok(self.settings.symbols.clone());
        }

        let tickers = self
            .market_service
            .get_tickers()
            .await
            .context("Failed to fetch tickers")?;
        let gainers = select_gainers(&tickers, self.settings.min_gainer_pct);

        info!(
            "MarketScanner: {} gainers >= {}%: {:?}",
            gainers.len(),
            self.settings.min_gainer_pct,
            gainers
                .iter()
                .map(|g| format!("{} {:.2}%", g.symbol, g.change_pct))
                .collect::<Vec<_>>()
        );
        if let Some(metrics) = &self.metrics {
            metrics.gainers_last_scan.set(gainers.len() as i64);
        }

        Ok(gainers.into_iter().map(|g| g.symbol).collect())
    }

    /// Fetches history once per timeframe, runs the enabled detectors and
    /// forwards every triggered result to the alert sink.
    pub async fn evaluate_symbol(&self, symbol: &str) -> SymbolReport {
        let config = &self.detector_config;
        let mut report = SymbolReport {
            symbol: symbol.to_string(),
            ..Default::default()
        };

        let daily = self
            .market_service
            .fetch_closes(symbol, self.settings.daily_timeframe)
            .await;
        self.note_history(&daily, self.settings.daily_timeframe);

        let mut alerts = Vec::new();

        if self.settings.confluence_enabled {
            let weekly = self
                .market_service
                .fetch_closes(symbol, self.settings.weekly_timeframe)
                .await;
            self.note_history(&weekly, self.settings.weekly_timeframe);

            let result = detect_confluence(&daily, &weekly, config);
            if result.triggered() {
                info!("MarketScanner: {} confluence: {}", symbol, result.message());
                alerts.push((
                    result.kind(),
                    format_confluence_alert(symbol, &result, config, Utc::now()),
                ));
            }
            report.confluence = Some(result);
        }

        if self.settings.squeeze_enabled {
            let result = detect_squeeze(&daily, config);
            if result.triggered() {
                info!("MarketScanner: {} squeeze: {}", symbol, result.message());
                let price = daily.last().copied().unwrap_or_default();
                alerts.push((
                    result.kind(),
                    format_squeeze_alert(symbol, price, &result, Utc::now()),
                ));
            }
            report.squeeze = Some(result);
        }

        for (kind, text) in alerts {
            self.alert_sink.send(&text).await;
            report.alerts_sent += 1;
            self.record_alert(kind);
        }

        debug!(
            "MarketScanner: {} evaluated ({} daily closes, {} alerts)",
            symbol,
            daily.len(),
            report.alerts_sent
        );
        report
    }

    /// One full pass: select symbols, then evaluate them one at a time with
    /// a pause in between.
    pub async fn scan_once(&self) -> Result<ScanSummary> {
        if let Some(metrics) = &self.metrics {
            metrics.scans_total.inc();
        }

        let symbols = self.select_symbols().await?;
        let mut summary = ScanSummary {
            candidates: symbols.len(),
            ..Default::default()
        };

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 && !self.settings.symbol_pause.is_zero() {
                time::sleep(self.settings.symbol_pause).await;
            }

            let report = self.evaluate_symbol(symbol).await;
            summary.evaluated += 1;
            summary.alerts_sent += report.alerts_sent;
            if let Some(metrics) = &self.metrics {
                metrics.symbols_evaluated_total.inc();
            }
        }

        if let Some(metrics) = &self.metrics {
            debug!("MarketScanner metrics:\n{}", metrics.render());
        }
        Ok(summary)
    }

    /// Scans immediately, then once per interval. A failed scan is logged and
    /// the loop carries on with the next tick.
    pub async fn run(&self) {
        info!(
            "MarketScanner started. Interval: {:?}",
            self.settings.scan_interval
        );

        let mut interval = time::interval(self.settings.scan_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately
            interval.tick().await;

            match self.scan_once().await {
                Ok(summary) => info!(
                    "MarketScanner: Scan complete: {} candidates, {} evaluated, {} alerts",
                    summary.candidates, summary.evaluated, summary.alerts_sent
                ),
                Err(e) => {
                    error!("MarketScanner: Scan failed: {:#}", e);
                    if let Some(metrics) = &self.metrics {
                        metrics.scan_failures_total.inc();
                    }
                }
            }
        }
    }

    fn note_history(&self, closes: &[f64], timeframe: Timeframe) {
        if closes.len() < self.detector_config.level_history() {
            debug!(
                "MarketScanner: {} closes on {} is short of {}",
                closes.len(),
                timeframe,
                self.detector_config.level_history()
            );
            if let Some(metrics) = &self.metrics {
                metrics.inc_insufficient_data(timeframe.to_mexc_string());
            }
        }
    }

    fn record_alert(&self, kind: DetectorKind) {
        if let Some(metrics) = &self.metrics {
            metrics.inc_signal(kind.as_str());
            metrics.alerts_sent_total.inc();
        }
    }
}
