use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type KanbanResult<T> = Result<T, KanbanError>;

impl KanbanError {
    /// Message suitable for showing to the user, without the category prefix.
    ///
    /// Server-reported messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Config(msg)
            | Self::Serialization(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::Server { message, .. } => message.clone(),
            Self::Io(err) => err.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
