use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const KIND_TEXT: &str = "text";
const KIND_CODE: &str = "code";
const KIND_MULTIMODAL_TEXT: &str = "multimodal_text";
const KIND_EXECUTION_OUTPUT: &str = "execution_output";
const KIND_BROWSING_DISPLAY: &str = "tether_browsing_display";
const KIND_QUOTE: &str = "tether_quote";
const KIND_SYSTEM_ERROR: &str = "system_error";

/// Message payload, discriminated by its `content_type` field.
///
/// Kinds that are not listed here deserialize into [`Content::Unknown`], which keeps the
/// untouched payload so nothing is lost for shapes this crate does not know about yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text { parts: Vec<String> },
    Code { language: Option<String>, text: String },
    MultimodalText { parts: Vec<MultimodalPart> },
    ExecutionOutput { text: String },
    BrowsingDisplay { result: String, summary: Option<String> },
    Quote { url: String, domain: String, title: Option<String>, text: String },
    SystemError { name: Option<String>, text: String },
    Unknown { content_type: String, payload: Value },
}

/// One part of a multimodal message: plain text, an uploaded asset, or anything else
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MultimodalPart {
    Text(String),
    Asset {
        asset_pointer: String,
        #[serde(default)]
        content_type: Option<String>,
    },
    Other(Value),
}

impl Content {
    /// The `content_type` discriminant this payload was read from
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => KIND_TEXT,
            Self::Code { .. } => KIND_CODE,
            Self::MultimodalText { .. } => KIND_MULTIMODAL_TEXT,
            Self::ExecutionOutput { .. } => KIND_EXECUTION_OUTPUT,
            Self::BrowsingDisplay { .. } => KIND_BROWSING_DISPLAY,
            Self::Quote { .. } => KIND_QUOTE,
            Self::SystemError { .. } => KIND_SYSTEM_ERROR,
            Self::Unknown { content_type, .. } => content_type,
        }
    }
}

#[derive(Deserialize)]
struct TextFields {
    #[serde(default)]
    parts: Vec<String>,
}

#[derive(Deserialize)]
struct CodeFields {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct MultimodalFields {
    #[serde(default)]
    parts: Vec<MultimodalPart>,
}

#[derive(Deserialize)]
struct OutputFields {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct BrowsingFields {
    #[serde(default)]
    result: String,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Deserialize)]
struct QuoteFields {
    #[serde(default)]
    url: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct SystemErrorFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    text: String,
}

fn fields<T: DeserializeOwned>(payload: Value) -> serde_json::Result<T> {
    serde_json::from_value(payload)
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        let content_type = payload
            .get("content_type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("content_type"))?
            .to_string();

        let content = match content_type.as_str() {
            KIND_TEXT => fields(payload).map(|TextFields { parts }| Self::Text { parts }),
            KIND_CODE => {
                fields(payload).map(|CodeFields { language, text }| Self::Code { language, text })
            }
            KIND_MULTIMODAL_TEXT => {
                fields(payload).map(|MultimodalFields { parts }| Self::MultimodalText { parts })
            }
            KIND_EXECUTION_OUTPUT => {
                fields(payload).map(|OutputFields { text }| Self::ExecutionOutput { text })
            }
            KIND_BROWSING_DISPLAY => fields(payload)
                .map(|BrowsingFields { result, summary }| Self::BrowsingDisplay { result, summary }),
            KIND_QUOTE => fields(payload).map(|QuoteFields { url, domain, title, text }| {
                Self::Quote { url, domain, title, text }
            }),
            KIND_SYSTEM_ERROR => fields(payload)
                .map(|SystemErrorFields { name, text }| Self::SystemError { name, text }),
            _ => Ok(Self::Unknown { content_type, payload }),
        };

        content.map_err(D::Error::custom)
    }
}
