//! Error types for plant-identify

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Failed to decode the API response")]
    Decoding,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("No API key configured. Set one with: plant-identify config --set-api-key <KEY>, or export GEMINI_API_KEY")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, Error>;
