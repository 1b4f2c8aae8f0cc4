use thiserror::Error;

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("No new names found in the first column")]
    NothingToImport,

    #[error("The wheel is busy; finish the current spin first")]
    Busy,
}

pub type Result<T> = std::result::Result<T, WheelError>;
