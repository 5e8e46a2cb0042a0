//! # Carry Engine
//!
//! Orchestration around the pure calculation core:
//!
//! - `Pipeline` runs validation and, only when it passes, the analysis engine,
//!   producing an `events::Evaluation`.
//! - `Recalculator` drives a `Pipeline` from a stream of edits, debouncing
//!   rapid submissions and surfacing only the outcome of the newest request.

pub mod error;
pub mod pipeline;
pub mod recalculator;

pub use error::EngineError;
pub use pipeline::Pipeline;
pub use recalculator::Recalculator;
