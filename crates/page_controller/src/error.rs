use thiserror::Error;

use crate::dom::DomError;

/// Why the data loader could not produce a payload. Every variant is shown to the
/// user through its message text alone.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("required element #{0} is missing from the document")]
    MissingElement(&'static str),
    #[error(transparent)]
    Dom(#[from] DomError),
}
