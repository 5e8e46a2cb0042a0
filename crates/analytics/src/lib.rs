//! # Carry Analysis Engine
//!
//! Secondary analytics on top of the arbitrage calculator: break-even prices,
//! one-at-a-time parameter sensitivities and the contango / backwardation
//! classification of the futures premium.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Logic:** A pure logic crate on top of `calculator`. It has no
//!   knowledge of forms, presentation or scheduling.
//! - **Stateless Calculation:** The `AnalysisEngine` recomputes everything from
//!   the input on every call. Each sensitivity perturbs the same unperturbed
//!   input, so the order of evaluation does not matter.
//!
//! ## Public API
//!
//! - `AnalysisEngine`: The main struct that contains the analysis logic.
//! - `AnalysisResult`: A `CalculationResult` extended with the three analyses.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalysisEngine;
pub use error::AnalyticsError;
pub use report::{AnalysisResult, BreakEven, MarketConditionReport, Sensitivity};
