use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::linearize::{LinearSequence, LinearizeError, linearize_conversation};
use crate::models::Conversation;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serializable form of one conversation: metadata plus its linearized messages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationDocument {
    pub id: String,
    pub title: String,
    pub create_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    pub messages: LinearSequence,
}

/// Build the document for a conversation, linearizing its node mapping
pub fn build_document(conversation: &Conversation) -> Result<ConversationDocument, LinearizeError> {
    let messages = linearize_conversation(conversation)?;

    Ok(ConversationDocument {
        id: conversation.id.clone(),
        title: conversation.display_title().to_string(),
        create_time: format_timestamp(&conversation.create_time),
        update_time: conversation.update_time.as_ref().map(format_timestamp),
        messages,
    })
}

/// `2024-01-15 10:30:00`, always UTC
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
