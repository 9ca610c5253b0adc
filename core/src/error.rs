use thiserror::Error;

/// Feil ved grensen mot omverdenen (henting, konvolutt, URL, filer).
/// Selve analysen feiler aldri; feltvise dekodefeil blir `Stage::Raw`.
#[derive(Debug, Error)]
pub enum DragyError {
    #[error("Error fetching data: {0}")]
    Fetch(String),

    #[error("invalid run envelope at {path}: {message}")]
    Envelope { path: String, message: String },

    #[error("invalid leaderboard URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DragyError>;
