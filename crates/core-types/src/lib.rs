//! # Carry Core Types
//!
//! Layer 0 data structures shared by every other crate: the structured input of
//! a cash-and-carry calculation, the result record it produces and the small
//! enums used to classify it.
//!
//! Nothing in here computes anything beyond trivial derived values (such as the
//! holding period of an input), so the crate depends only on `rust_decimal`,
//! `chrono` and `serde`.

pub mod enums;
pub mod error;
pub mod input;
pub mod result;

// Re-export the core types to provide a clean public API.
pub use enums::{MarketCondition, RiskLevel};
pub use error::CoreError;
pub use input::{CalculationInput, PartialInput};
pub use result::{Breakdown, CalculationResult, LeverageMetrics};

/// Number of days used to annualize rates and returns.
pub const DAYS_PER_YEAR: i64 = 365;
