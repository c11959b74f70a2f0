/*
[INPUT]:  Public API exports for mexc-futures-runner crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod precision;
pub mod smoke;

// Re-export main types for convenience
pub use config::{AtrRange, RateLimits, TradingConfig};
pub use precision::round_to_precision;
pub use smoke::{SmokeReport, run_smoke};
