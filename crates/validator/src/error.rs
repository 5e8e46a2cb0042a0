use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("Unknown input field '{0}'")]
    UnknownField(String),
}
