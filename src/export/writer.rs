use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use super::document::ConversationDocument;
use crate::models::Conversation;
use crate::utils::slugify_title;

const ID_PREFIX_CHARS: usize = 8;

/// Serialization format for exported documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Encode a document; non-ASCII text is written as-is
pub fn encode_document(document: &ConversationDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(document).context("Failed to encode YAML"),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(document).context("Failed to encode JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// `<YYYY-MM-DD>_<title-slug>_<id-prefix>.<ext>`, or without the slug for untitled ones
pub fn document_file_name(conversation: &Conversation, format: OutputFormat) -> String {
    file_name(conversation, format, ID_PREFIX_CHARS, None)
}

/// Like [`document_file_name`], but never returns a name contained in `taken`.
///
/// On a clash the full sanitized id replaces the id prefix; if that clashes too, a
/// numeric suffix (`_2`, `_3`, ...) is appended.
pub fn unique_document_file_name(
    conversation: &Conversation,
    format: OutputFormat,
    taken: &HashSet<String>,
) -> String {
    let short = document_file_name(conversation, format);
    if !taken.contains(&short) {
        return short;
    }

    let full = file_name(conversation, format, usize::MAX, None);
    if !taken.contains(&full) {
        return full;
    }

    (2..)
        .map(|n| file_name(conversation, format, usize::MAX, Some(n)))
        .find(|name| !taken.contains(name))
        .unwrap_or(full)
}

fn file_name(
    conversation: &Conversation,
    format: OutputFormat,
    id_chars: usize,
    suffix: Option<usize>,
) -> String {
    let date = conversation.create_time.format("%Y-%m-%d");
    let id_part: String = conversation
        .id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(id_chars)
        .collect();
    let slug = conversation.title.as_deref().map(slugify_title).unwrap_or_default();

    let mut stem = if slug.is_empty() {
        format!("{}_{}", date, id_part)
    } else {
        format!("{}_{}_{}", date, slug, id_part)
    };
    if let Some(n) = suffix {
        stem = format!("{}_{}", stem, n);
    }

    format!("{}.{}", stem, format.extension())
}

/// Write a file atomically (temp file + rename), creating parent directories
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    fs::rename(temp_path, path)
        .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;

    Ok(())
}
