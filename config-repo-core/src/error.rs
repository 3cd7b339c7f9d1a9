use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load config source '{path}': {reason}")]
    FileLoad { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn file_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::FileLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
