// Error types shared by every stage of the pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load tags: {0}")]
    LoadError(String),
    #[error("Failed to generate QR code: {0}")]
    EncodeError(String),
    #[error("Failed to render PDF: {0}")]
    RenderError(String),
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
