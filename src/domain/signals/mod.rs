//! Multi-timeframe signal detectors.
//!
//! Detectors are pure functions of borrowed close series and a
//! [`DetectorConfig`]. Insufficient history or a zero denominator yields a
//! non-triggered result, never an error.

pub mod config;
pub mod confluence;
pub mod squeeze;

pub use config::DetectorConfig;
pub use confluence::{ConfluenceResult, detect_confluence, evaluate_confluence};
pub use squeeze::{SqueezeResult, detect_squeeze};

use std::fmt;

/// Which detector produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    Confluence,
    Squeeze,
}

impl DetectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::Confluence => "confluence",
            DetectorKind::Squeeze => "squeeze",
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(triggered, message)` view shared by every detector result.
///
/// `message()` is empty whenever `triggered()` is false.
pub trait SignalReport {
    fn kind(&self) -> DetectorKind;
    fn triggered(&self) -> bool;
    fn message(&self) -> &str;
}
