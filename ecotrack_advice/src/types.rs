use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Result of validating an untyped model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum CollaboratorReply<T> {
    Parsed(T),
    /// Raw text kept for logging; never read field-by-field.
    Malformed(String),
}

impl<T> CollaboratorReply<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            CollaboratorReply::Parsed(v) => Some(v),
            CollaboratorReply::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceTip {
    pub tip: String,
    pub category: String,
}

impl AdviceTip {
    pub fn new(tip: &str, category: &str) -> Self {
        AdviceTip {
            tip: tip.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    /// Free text, e.g. "~12 kg CO2/month".
    pub impact: String,
    /// Free text, e.g. "Week 1".
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BillScanOutcome {
    Reading(f64),
    NotFound(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Image or document sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineAttachment {
    pub mime_type: String,
    pub data_base64: String,
}

impl InlineAttachment {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        InlineAttachment {
            mime_type: mime_type.to_string(),
            data_base64: BASE64.encode(bytes),
        }
    }
}

/// Shape the caller expects back from the model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ResponseFormat {
    Text,
    AdviceList,
    Roadmap,
    BillScan,
}

impl ResponseFormat {
    /// JSON schema handed to model adapters that support structured output.
    pub fn schema(&self) -> Option<Value> {
        let string = json!({ "type": "string" });
        match self {
            ResponseFormat::Text => None,
            ResponseFormat::AdviceList => Some(json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "tip": string, "category": string },
                    "required": ["tip", "category"]
                }
            })),
            ResponseFormat::Roadmap => Some(json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": string,
                        "description": string,
                        "impact": string,
                        "timeline": string
                    },
                    "required": ["title", "description", "impact", "timeline"]
                }
            })),
            ResponseFormat::BillScan => Some(json!({
                "type": "object",
                "properties": {
                    "kwh": { "type": "number" },
                    "error": string
                }
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub turns: Vec<ChatTurn>,
    pub attachment: Option<InlineAttachment>,
    pub response_format: ResponseFormat,
}

impl GenerationRequest {
    pub fn prompt(model: &str, prompt: String, response_format: ResponseFormat) -> Self {
        GenerationRequest {
            model: model.to_string(),
            system_instruction: None,
            turns: vec![ChatTurn {
                role: ChatRole::User,
                text: prompt,
            }],
            attachment: None,
            response_format,
        }
    }
}
