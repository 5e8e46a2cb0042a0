use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Holding period of {0} days is outside the supported range of 1 to {1} days")]
    InvalidHoldingPeriod(i64, i64),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(&'static str, String),

    /// A figure fell outside the range of `Decimal`.
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}
