//! # Carry Events
//!
//! The messages handed from the orchestration layer to presentation: the
//! outcome of evaluating one calculation request.
//!
//! Outcomes replace any earlier outcome wholesale; nothing here is ever
//! updated in place.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::{Evaluation, Outcome};
