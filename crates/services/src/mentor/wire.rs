//! Request/response shapes for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use mentor_core::model::DialogueTurn;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

/// Response schema constraining the model to the dialogue envelope.
pub(crate) fn dialogue_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dialogues": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "speaker": { "type": "STRING" },
                        "text": { "type": "STRING" },
                        "isUserTurn": { "type": "BOOLEAN" }
                    },
                    "required": ["speaker", "text", "isUserTurn"]
                }
            }
        },
        "required": ["dialogues"]
    })
}

/// Envelope the dialogue schema makes the model emit.
#[derive(Debug, Deserialize)]
pub(crate) struct DialogueEnvelope {
    pub dialogues: Vec<DialogueTurn>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// First text part of the first candidate, if any.
    pub(crate) fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .find_map(|part| part.text)
    }
}
