use async_openai::error::OpenAIError;
use thiserror::Error;

// Enum for handling application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to settings (de)serialization.

    #[error("Failed to install the logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Logger already initialized")]
    LoggerAlreadySet,

    #[error("Home directory not found")]
    HomeDirNotFound,
}

// Errors surfaced by the turn resolver to the game controller.
#[derive(Debug, Error)]
pub enum AIError {
    // No response object came back at all. Fatal to the turn, never to the session.
    #[error("Transport error: {0}")]
    Transport(String),

    // A reply came back but does not have the expected shape.
    #[error("Failed to parse boss reply: {0}")]
    ReplyParse(String),
}

// Errors reported by a dialogue generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation transport error: {0}")]
    Transport(String),

    #[error("Generation rejected: {0}")]
    Rejected(String),
}

impl From<OpenAIError> for GenerationError {
    fn from(err: OpenAIError) -> Self {
        match err {
            // The endpoint answered, just not with something usable.
            OpenAIError::ApiError(api_error) => GenerationError::Rejected(api_error.to_string()),
            OpenAIError::JSONDeserialize(e) => GenerationError::Rejected(e.to_string()),
            other => GenerationError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AIError {
    fn from(err: serde_json::Error) -> AIError {
        AIError::ReplyParse(err.to_string())
    }
}
