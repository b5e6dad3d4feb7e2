// Error types for profile loading

use dynamodel_core::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load profile: {0}")]
    LoadError(String),

    #[error("Failed to parse profile: {0}")]
    ParseError(String),

    #[error("Profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
