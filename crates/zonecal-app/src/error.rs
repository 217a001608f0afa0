use thiserror::Error;

/// Application-level errors (document loading and output)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RfcError(#[from] zonecal_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] zonecal_core::error::CoreError),

    #[error("Failed to load calendar document: {0}")]
    DocumentError(#[from] config::ConfigError),

    #[error("Invalid event `{uid}`: {reason}")]
    InvalidEvent { uid: String, reason: String },

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
