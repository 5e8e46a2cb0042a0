use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Recalculation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
