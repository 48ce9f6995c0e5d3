use thiserror::Error;

/// Error type for the console collaborator and configuration layer.
///
/// Ledger operations themselves never fail; these variants cover input
/// parsing, prompting and config file access.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<dialoguer::Error> for LedgerError {
    fn from(err: dialoguer::Error) -> Self {
        LedgerError::Prompt(err.to_string())
    }
}
