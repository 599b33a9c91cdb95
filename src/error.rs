use thiserror::Error;

/// Message shown to the user whenever a diagram cannot be produced.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not build the mind map diagram. Please try again.";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid topic tree at {path}: {reason}")]
    InvalidTree { path: String, reason: String },

    #[error("render target unavailable: {0}")]
    RenderTarget(String),

    #[error("response is not a topic tree: {0}")]
    Parse(String),

    #[error("upstream service reported an error: {0}")]
    Upstream(String),

    #[error("failed to rasterize diagram: {0}")]
    Svg(String),

    #[error("failed to encode png: {0}")]
    Png(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Text suitable for the surrounding UI. Upstream errors carry their own
    /// wording; everything else collapses to the generic failure message.
    pub fn user_message(&self) -> &str {
        match self {
            Error::Upstream(message) => message.as_str(),
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
