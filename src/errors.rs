use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A required field is missing or malformed.
    #[error("{message}")]
    Validation { message: String },

    /// The write would violate a uniqueness rule.
    #[error("{message}")]
    Conflict { message: String },

    #[error("Panel not found")]
    PanelNotFound { id: i64 },

    #[error("Channel not found")]
    ChannelNotFound { id: String },

    /// A panel references a category id the guild no longer defines.
    #[error("Invalid category: {id}")]
    InvalidCategory { id: i64 },

    #[error("Missing admin identity")]
    Unauthorized,

    #[error("Chat platform error: {message}")]
    Platform { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn duplicate_panel_name() -> Self {
        Self::Conflict {
            message: "A panel with this name already exists".to_string(),
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::FrameworkError(Box::new(value))
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
