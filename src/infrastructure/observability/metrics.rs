//! Prometheus metrics definitions for the scanner
//!
//! All metrics use the `htf_` prefix.

use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Counters describing scan activity
#[derive(Clone)]
pub struct ScanMetrics {
    registry: Arc<Registry>,
    /// Started scan cycles, failed ones included
    pub scans_total: IntCounter,
    /// Scan cycles aborted because the ticker list was unavailable
    pub scan_failures_total: IntCounter,
    /// Symbols run through the detectors
    pub symbols_evaluated_total: IntCounter,
    /// Gainers found by the most recent scan
    pub gainers_last_scan: IntGauge,
    /// Triggered detector results by detector
    pub signals_total: IntCounterVec,
    /// Series too short for the level aggregator, by timeframe
    pub insufficient_data_total: IntCounterVec,
    /// Alerts handed to the sink
    pub alerts_sent_total: IntCounter,
}

impl ScanMetrics {
    /// Create a new ScanMetrics instance with all counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let scans_total = IntCounter::with_opts(Opts::new(
            "htf_scans_total",
            "Completed scan cycles",
        ))?;
        registry.register(Box::new(scans_total.clone()))?;

        let scan_failures_total = IntCounter::with_opts(Opts::new(
            "htf_scan_failures_total",
            "Scan cycles aborted before evaluating symbols",
        ))?;
        registry.register(Box::new(scan_failures_total.clone()))?;

        let symbols_evaluated_total = IntCounter::with_opts(Opts::new(
            "htf_symbols_evaluated_total",
            "Symbols run through the detectors",
        ))?;
        registry.register(Box::new(symbols_evaluated_total.clone()))?;

        let gainers_last_scan = IntGauge::with_opts(Opts::new(
            "htf_gainers_last_scan",
            "Gainers selected by the most recent scan",
        ))?;
        registry.register(Box::new(gainers_last_scan.clone()))?;

        let signals_total = IntCounterVec::new(
            Opts::new("htf_signals_total", "Triggered detector results"),
            &["detector"],
        )?;
        registry.register(Box::new(signals_total.clone()))?;

        let insufficient_data_total = IntCounterVec::new(
            Opts::new(
                "htf_insufficient_data_total",
                "Close series shorter than the level aggregator needs",
            ),
            &["timeframe"],
        )?;
        registry.register(Box::new(insufficient_data_total.clone()))?;

        let alerts_sent_total = IntCounter::with_opts(Opts::new(
            "htf_alerts_sent_total",
            "Alerts handed to the alert sink",
        ))?;
        registry.register(Box::new(alerts_sent_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            scans_total,
            scan_failures_total,
            symbols_evaluated_total,
            gainers_last_scan,
            signals_total,
            insufficient_data_total,
            alerts_sent_total,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_signal(&self, detector: &str) {
        self.signals_total.with_label_values(&[detector]).inc();
    }

    pub fn inc_insufficient_data(&self, timeframe: &str) {
        self.insufficient_data_total
            .with_label_values(&[timeframe])
            .inc();
    }
}
