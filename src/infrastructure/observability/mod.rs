//! Push-based observability for the scanner
//!
//! Counters are kept in a private Prometheus registry and rendered to text
//! for the log after every scan. Nothing listens for incoming requests.

pub mod metrics;

pub use metrics::ScanMetrics;
