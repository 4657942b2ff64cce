// Alert text templates
pub mod alerts;

// Gainer selection and per-symbol detection loop
pub mod scanner;

pub use scanner::{MarketScanner, ScanSummary, ScannerSettings, SymbolReport};
