// Market data domain
pub mod market;

// Indicator computation
pub mod indicators;

// Signal detectors
pub mod signals;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
