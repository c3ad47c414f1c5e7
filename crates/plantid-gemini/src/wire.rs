//! Request and response types for the generateContent endpoint
//!
//! Request structs serialize the exact body the service expects, with the
//! generation parameters and safety thresholds fixed as constants. Response
//! structs are lenient: every field the service may omit is optional, and
//! the overall shape is classified afterwards by [`GenerateContentResponse::outcome`].

use serde::{Deserialize, Serialize};

use crate::prompts;

/// Harm categories moderated on every request.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: i32,
    top_p: f32,
    max_output_tokens: i32,
    stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_k: 32,
            top_p: 1.0,
            max_output_tokens: 256,
            stop_sequences: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// Build the request body for one identification call: the fixed
/// instruction plus the JPEG bytes as inline data.
pub(crate) fn identify_request(image_base64: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                ContentPart::Text {
                    text: prompts::IDENTIFY_PROMPT.to_string(),
                },
                ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/jpeg".to_string(),
                        data: image_base64.to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig::default(),
        safety_settings: SAFETY_CATEGORIES
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold: SAFETY_THRESHOLD,
            })
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ErrorStatus>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    message: Option<String>,
}

/// What a parsed response body turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplyOutcome {
    /// First candidate's first part carried text.
    Text(String),
    /// The body matched the error shape and carried a message.
    ApiFailure(String),
    /// Valid JSON, but neither shape matched.
    Unrecognized,
}

impl GenerateContentResponse {
    /// Classify the body. The success shape wins over the error shape
    /// when both are present.
    pub(crate) fn outcome(self) -> ReplyOutcome {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text);

        if let Some(text) = text {
            return ReplyOutcome::Text(text);
        }

        if let Some(message) = self.error.and_then(|error| error.message) {
            return ReplyOutcome::ApiFailure(message);
        }

        ReplyOutcome::Unrecognized
    }
}
