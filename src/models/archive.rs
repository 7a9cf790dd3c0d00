use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::content::Content;

/// Node identifier to node, as stored in a conversation's `mapping` field
pub type NodeMapping = HashMap<String, Node>;

const ROLE_TOOL: &str = "tool";

/// Author of a message. Tool authors carry the name of the tool that produced the message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAuthor")]
pub enum Author {
    System,
    User,
    Assistant,
    Tool { name: String },
    Other(String),
}

#[derive(Deserialize)]
struct RawAuthor {
    role: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawAuthor> for Author {
    type Error = String;

    fn try_from(raw: RawAuthor) -> Result<Self, Self::Error> {
        match raw.role.as_str() {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            ROLE_TOOL => match raw.name {
                Some(name) => Ok(Self::Tool { name }),
                None => Err("tool author is missing its name".to_string()),
            },
            _ => Ok(Self::Other(raw.role)),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::Tool { name } => write!(f, "tool({})", name),
            Self::Other(role) => write!(f, "{}", role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_epoch_seconds"
    )]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_epoch_seconds"
    )]
    pub update_time: Option<DateTime<Utc>>,
    pub content: Content,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// One conversation from the archive.
///
/// Exports carry the identifier as `id`, `conversation_id`, or both; whichever is
/// present wins, with `id` preferred.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawConversation")]
pub struct Conversation {
    pub id: String,
    pub title: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: Option<DateTime<Utc>>,
    pub mapping: NodeMapping,
    pub current_node: Option<String>,
}

#[derive(Deserialize)]
struct RawConversation {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(deserialize_with = "crate::parsers::deserializers::deserialize_epoch_seconds")]
    create_time: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_epoch_seconds"
    )]
    update_time: Option<DateTime<Utc>>,
    mapping: NodeMapping,
    #[serde(default)]
    current_node: Option<String>,
}

impl TryFrom<RawConversation> for Conversation {
    type Error = String;

    fn try_from(raw: RawConversation) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.conversation_id)
            .ok_or_else(|| "conversation has neither `id` nor `conversation_id`".to_string())?;

        Ok(Self {
            id,
            title: raw.title,
            create_time: raw.create_time,
            update_time: raw.update_time,
            mapping: raw.mapping,
            current_node: raw.current_node,
        })
    }
}

impl Conversation {
    /// Title for display, falling back to a placeholder for untitled conversations
    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled",
        }
    }
}
