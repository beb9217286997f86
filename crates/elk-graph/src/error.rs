#[derive(Debug, thiserror::Error)]
pub enum ElkError {
    #[error("layout engine failed: {message}")]
    Engine { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ElkError {
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ElkError>;
