use lexdannet_core::ExternalRequestFailure;

#[derive(Debug, thiserror::Error)]
pub enum WikibaseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid item id: {0}")]
    InvalidItem(String),
}

impl From<WikibaseError> for ExternalRequestFailure {
    fn from(error: WikibaseError) -> Self {
        ExternalRequestFailure::new(error.to_string())
    }
}
