use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbersError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl EmbersError {
    /// Cancellation is not a user-visible failure; callers use this to
    /// drop the result silently instead of reporting an error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EmbersError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, EmbersError>;
