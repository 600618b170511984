use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Missing element: #{0}")]
    MissingElement(String),

    #[error("Track manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[allow(dead_code)]
    #[error("DOM error: {0}")]
    Dom(String),
}

pub type PlayerResult<T> = Result<T, PlayerError>;
