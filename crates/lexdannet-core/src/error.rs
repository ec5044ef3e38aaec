/// Fatal loader failures. Any of these aborts the run before matching starts.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dump could not be downloaded, found or opened
    #[error("DanNet dataset unavailable: {0}")]
    Unavailable(String),

    /// The container could not be parsed at all
    #[error("DanNet dataset format error: {0}")]
    Format(String),
}

/// A knowledge-base call that did not succeed. Never fatal for a single lexeme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("external request failed: {message}")]
pub struct ExternalRequestFailure {
    pub message: String,
}

impl ExternalRequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
