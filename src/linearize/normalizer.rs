//! Message normalization: flattens one archive message into a [`NormalizedMessage`]
//! and builds its display teaser.

use crate::models::{Content, Message, MultimodalPart, NormalizedMessage, SimplifiedContent};

/// Maximum teaser width in characters, prefix included
pub const TEASER_WIDTH: usize = 70;

const UNKNOWN_TEASER: &str = "UNKNOWN";

/// Normalize a single message. Never fails: unknown content kinds keep their payload.
pub fn normalize_message(message: &Message) -> NormalizedMessage {
    let author = message.author.to_string();
    let content_type = message.content.kind().to_string();
    let prefix = teaser_prefix(&content_type, &author);
    let max_body = TEASER_WIDTH.saturating_sub(prefix.chars().count());

    let (fields, body) = match &message.content {
        Content::Text { parts } => {
            let value = parts.first().cloned().unwrap_or_default();
            let body = truncate_chars(first_line(&value), max_body).to_string();
            (SimplifiedContent::Text { value }, body)
        }
        Content::Code { text, .. } => {
            let body = truncate_chars(first_line(text), max_body).to_string();
            (SimplifiedContent::Code { text: text.clone() }, body)
        }
        Content::MultimodalText { parts } => {
            let asset_pointer = first_asset_pointer(parts).unwrap_or_default().to_string();
            let body = truncate_chars(&asset_pointer, max_body).to_string();
            (SimplifiedContent::MultimodalText { asset_pointer }, body)
        }
        Content::ExecutionOutput { text } => {
            let body = truncate_chars(first_line(text), max_body).to_string();
            (SimplifiedContent::ExecutionOutput { text: text.clone() }, body)
        }
        Content::BrowsingDisplay { result, .. } => {
            let body = truncate_chars(first_line(result), max_body).to_string();
            (SimplifiedContent::BrowsingDisplay { result: result.clone() }, body)
        }
        Content::Quote { url, domain, text, .. } => {
            // The cap applies to the quoted text alone, the url is prepended afterwards
            let body = format!("{} | {}", url, truncate_chars(first_line(text), max_body));
            let fields = SimplifiedContent::Quote {
                url: url.clone(),
                domain: domain.clone(),
                text: text.clone(),
            };
            (fields, body)
        }
        Content::SystemError { text, .. } => {
            let body = truncate_chars(first_line(text), max_body).to_string();
            (SimplifiedContent::SystemError { text: text.clone() }, body)
        }
        Content::Unknown { payload, .. } => {
            let body = truncate_chars(UNKNOWN_TEASER, max_body).to_string();
            (SimplifiedContent::Unknown { original_content: payload.clone() }, body)
        }
    };

    NormalizedMessage {
        id: message.id.clone(),
        teaser: format!("{}{}", prefix, body),
        author,
        content_type,
        fields,
    }
}

/// `[<content-kind>][<author>] `
pub fn teaser_prefix(content_type: &str, author: &str) -> String {
    format!("[{}][{}] ", content_type, author)
}

fn first_asset_pointer(parts: &[MultimodalPart]) -> Option<&str> {
    parts.iter().find_map(|part| match part {
        MultimodalPart::Asset { asset_pointer, .. } => Some(asset_pointer.as_str()),
        _ => None,
    })
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Keep at most `max_chars` characters, cutting on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
