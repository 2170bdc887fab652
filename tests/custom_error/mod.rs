use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomError {
    #[error("custom error occurred")]
    Custom,
    #[error("request to {0} failed")]
    Request(String),
}
