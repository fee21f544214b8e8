use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt store: {0}")]
    Corrupt(String),
}
