use thiserror::Error;

/// Convenient alias for results returned by the chunking boundary checks.
pub type Result<T> = std::result::Result<T, ChunkingError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChunkingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid settings: {0}")]
    Settings(String),
}

impl ChunkingError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let error = ChunkingError::invalid_input("word 3 is empty");
        assert_eq!(error.to_string(), "invalid input: word 3 is empty");
        assert_eq!(
            ChunkingError::Settings("bad".into()).to_string(),
            "invalid settings: bad"
        );
    }
}
