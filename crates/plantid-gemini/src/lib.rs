//! Gemini-backed plant identification

mod prompts;
mod wire;

pub use prompts::IDENTIFY_PROMPT;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use plantid_types::{Error, Plant, Result};

use wire::ReplyOutcome;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// JPEG re-encode quality applied to every submitted image.
const JPEG_QUALITY: u8 = 80;

/// Name used when the reply carries no usable name line.
const UNKNOWN_PLANT: &str = "Unknown Plant";

/// Client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point the client at a different host. Used by tests to stand in
    /// for the real endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

/// Gemini identification client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.base_url, self.config.model, method, self.config.api_key
        )
    }

    /// Identify the plant in the given image.
    ///
    /// The image is re-encoded as JPEG and submitted in a single POST.
    /// The reply body decides the outcome regardless of HTTP status: the
    /// candidate text shape parses into a [`Plant`], the error shape
    /// surfaces as [`Error::Api`], anything else is [`Error::Decoding`].
    pub async fn identify(&self, image_bytes: &[u8]) -> Result<Plant> {
        let jpeg = encode_jpeg(image_bytes)?;
        let request = wire::identify_request(&STANDARD.encode(&jpeg));

        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            image_bytes = image_bytes.len(),
            jpeg_bytes = jpeg.len(),
            "Sending identification request to Gemini API"
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let body = response.text().await?;

        // Two-step parse: non-JSON text is the Json pass-through, JSON of
        // the wrong shape is a decode failure
        let value: serde_json::Value = serde_json::from_str(&body)?;
        let reply: wire::GenerateContentResponse =
            serde_json::from_value(value).map_err(|_| Error::Decoding)?;
        match reply.outcome() {
            ReplyOutcome::Text(text) => Ok(parse_reply(&text)),
            ReplyOutcome::ApiFailure(message) => {
                tracing::debug!(message = %message, "Gemini API returned an error body");
                Err(Error::Api(message))
            }
            ReplyOutcome::Unrecognized => Err(Error::Decoding),
        }
    }
}

/// Re-encode arbitrary raster bytes as a quality-reduced JPEG.
///
/// Alpha channels are flattened to RGB first since JPEG cannot carry them.
/// Any decode or encode failure is reported as [`Error::InvalidImage`]
/// before network activity happens.
fn encode_jpeg(image_bytes: &[u8]) -> Result<Vec<u8>> {
    let image =
        image::load_from_memory(image_bytes).map_err(|e| Error::InvalidImage(e.to_string()))?;
    let rgb = image.to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| Error::InvalidImage(e.to_string()))?;

    Ok(jpeg)
}

/// Split the reply text into a plant record.
///
/// The first non-empty trimmed line is the name; the remaining lines are
/// joined with single spaces to form the description.
fn parse_reply(text: &str) -> Plant {
    let mut lines = text.lines();

    let name = lines
        .by_ref()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(UNKNOWN_PLANT)
        .to_string();

    let description = lines.collect::<Vec<_>>().join(" ").trim().to_string();

    Plant { name, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let image = image::DynamicImage::ImageRgba8(image::RgbaImage::new(8, 8));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_parse_reply_name_and_description() {
        let plant = parse_reply("Rose\nA fragrant flowering shrub.");
        assert_eq!(plant.name, "Rose");
        assert_eq!(plant.description, "A fragrant flowering shrub.");
    }

    #[test]
    fn test_parse_reply_joins_description_lines() {
        let plant = parse_reply("Oak\nLine1\nLine2");
        assert_eq!(plant.name, "Oak");
        assert_eq!(plant.description, "Line1 Line2");
    }

    #[test]
    fn test_parse_reply_blank_trailing_lines_give_empty_description() {
        let plant = parse_reply("Fern\n\n");
        assert_eq!(plant.name, "Fern");
        assert_eq!(plant.description, "");
    }

    #[test]
    fn test_parse_reply_skips_leading_blank_lines() {
        let plant = parse_reply("\n\n  Maple  \nBroad leaves");
        assert_eq!(plant.name, "Maple");
        assert_eq!(plant.description, "Broad leaves");
    }

    #[test]
    fn test_parse_reply_empty_text_falls_back() {
        let plant = parse_reply("");
        assert_eq!(plant.name, "Unknown Plant");
        assert_eq!(plant.description, "");

        let plant = parse_reply("\n \n");
        assert_eq!(plant.name, "Unknown Plant");
        assert_eq!(plant.description, "");
    }

    #[test]
    fn test_parse_reply_single_line() {
        let plant = parse_reply("Cactus");
        assert_eq!(plant.name, "Cactus");
        assert_eq!(plant.description, "");
    }

    #[test]
    fn test_parse_reply_is_pure() {
        let text = "Ivy\nClimbing vine";
        assert_eq!(parse_reply(text), parse_reply(text));
    }

    #[test]
    fn test_encode_jpeg_accepts_png_with_alpha() {
        let jpeg = encode_jpeg(&png_bytes()).unwrap();
        let reloaded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(
            image::guess_format(&jpeg).unwrap(),
            image::ImageFormat::Jpeg
        );
        assert_eq!(reloaded.width(), 8);
        assert_eq!(reloaded.height(), 8);
    }

    #[test]
    fn test_encode_jpeg_rejects_garbage() {
        let err = encode_jpeg(b"not an image").unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));
    }

    #[test]
    fn test_api_url_embeds_model_and_key() {
        let client = GeminiClient::new(GeminiConfig::new("secret").with_model("gemini-1.5-pro"));
        assert_eq!(
            client.api_url("generateContent"),
            format!("{GEMINI_API_BASE}/models/gemini-1.5-pro:generateContent?key=secret")
        );
    }
}
