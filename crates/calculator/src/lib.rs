//! # Carry Arbitrage Calculator
//!
//! The pure numeric model of a cash-and-carry position: buy spot, sell the
//! future, hold until maturity. Turns a `CalculationInput` into a
//! `CalculationResult` using decimal arithmetic only.
//!
//! ## Public API
//!
//! - `ArbitrageCalculator`: the calculation entry point.
//! - `RiskClassifier`: the LOW / MEDIUM / HIGH bucketing applied to results.
//! - `costs`: the shared carry-cost formulas, also used for break-even analysis.
//! - `CalculatorError`: raised only for inputs the validator should have rejected.

pub mod calculator;
pub mod costs;
pub mod error;
pub mod risk;

pub use calculator::ArbitrageCalculator;
pub use error::CalculatorError;
pub use risk::RiskClassifier;
