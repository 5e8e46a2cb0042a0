use calculator::CalculatorError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Base calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(&'static str, String),
}
