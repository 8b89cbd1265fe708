/// Central error type for the Momi system.
#[derive(Debug, thiserror::Error)]
pub enum MomiError {
    #[error("storage failure: {message}")]
    Storage { message: String },

    #[error("share token could not be read: {reason}")]
    Decode { reason: String },

    #[error("recipe book not found: {id}")]
    BookNotFound { id: String },

    #[error("recipe not found: {id}")]
    RecipeNotFound { id: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MomiError {
    pub fn storage(message: impl std::fmt::Display) -> Self {
        MomiError::Storage {
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for MomiError {
    fn from(e: serde_json::Error) -> Self {
        MomiError::Serialization(e.to_string())
    }
}
