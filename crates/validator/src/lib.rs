//! # Carry Input Validator
//!
//! Checks a (possibly incomplete) set of calculation parameters before any
//! calculation is attempted.
//!
//! ## Behaviour
//!
//! - **Collect, don't throw:** every rule runs and every violation is reported,
//!   so a form can show all of its problems at once.
//! - **Errors vs warnings:** errors block calculation, warnings are advisory
//!   and travel alongside a successful result.
//! - **Configurable bounds:** all limits come from `configuration::Settings`.
//!
//! ## Public API
//!
//! - `InputValidator`: runs the rules over a `PartialInput` or a `RawInput`.
//! - `RawInput`: the string form of the parameters, as typed by a user.
//! - `ValidationReport` / `ValidationIssue`: the outcome of a validation pass.

pub mod error;
pub mod field;
pub mod issue;
pub mod raw;
pub mod rules;

pub use error::ValidatorError;
pub use field::Field;
pub use issue::{IssueKind, ValidationIssue, ValidationReport};
pub use raw::RawInput;
pub use rules::InputValidator;
