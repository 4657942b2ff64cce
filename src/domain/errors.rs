use thiserror::Error;

/// Errors raised by the exchange data source.
///
/// These never reach the detectors: the data source port converts them to an
/// empty series.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Exchange rejected request to {endpoint}: code {code}")]
    Rejected { endpoint: String, code: i64 },

    #[error("Malformed payload from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

/// Errors from a single alert delivery attempt.
///
/// Sinks log and swallow these; they never propagate into the scan loop.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Alert transport failed: {0}")]
    Transport(String),

    #[error("Alert endpoint answered HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Invalid detector thresholds or window lengths.
#[derive(Debug, Error, PartialEq)]
pub enum DetectorConfigError {
    #[error("{name} must be at least 1")]
    ZeroLength { name: &'static str },

    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}
