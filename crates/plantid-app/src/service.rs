//! Identification use case
//!
//! Orchestrates one identification: validate the input image, resolve the
//! API key, read the file, and submit it through the Gemini client.

use crate::config::Config;
use crate::scanner::validate_image;
use plantid_gemini::{GeminiClient, GeminiConfig};
use plantid_types::{Plant, Result};
use std::path::Path;

/// Identify the plant in an image file.
///
/// Builds the client from the configuration; `api_key_override` takes
/// precedence over the environment and the stored key.
pub async fn identify_file(
    image_path: &Path,
    config: &Config,
    api_key_override: Option<&str>,
) -> Result<Plant> {
    let api_key = config.resolve_api_key(api_key_override)?;
    let client = GeminiClient::new(GeminiConfig::new(&api_key).with_model(&config.model));
    identify_file_with(image_path, &client).await
}

/// Identify the plant in an image file using a caller-provided client.
pub async fn identify_file_with(image_path: &Path, client: &GeminiClient) -> Result<Plant> {
    validate_image(image_path)?;

    let bytes = std::fs::read(image_path)?;

    tracing::debug!(
        path = %image_path.display(),
        bytes = bytes.len(),
        "Identifying plant image"
    );

    client.identify(&bytes).await
}
