use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::Conversation;
use crate::utils::validate_file_size;

/// Parse a `conversations.json` archive file
/// Gracefully handles malformed conversations by logging and skipping them
/// Returns an error if the file is not a JSON array or more than 50% of conversations fail
pub fn parse_archive_file(path: &Path, max_bytes: u64) -> Result<Vec<Conversation>> {
    // Open file and validate size on the same handle to avoid TOCTOU races
    let file = File::open(path)
        .with_context(|| format!("Failed to open archive file: {}", path.display()))?;
    validate_file_size(&file, path, max_bytes)?;

    let mut content = String::new();
    BufReader::new(file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read archive file: {}", path.display()))?;

    parse_archive(&content).with_context(|| format!("Invalid archive: {}", path.display()))
}

/// Parse archive content already loaded in memory
pub fn parse_archive(content: &str) -> Result<Vec<Conversation>> {
    let value: Value = serde_json::from_str(content).context("Archive is not valid JSON")?;
    let Value::Array(items) = value else {
        bail!("Archive must be a JSON array of conversations");
    };

    let total = items.len();
    let mut conversations = Vec::with_capacity(total);
    let mut skipped_count = 0;

    for (index, item) in items.into_iter().enumerate() {
        let label = item
            .get("id")
            .or_else(|| item.get("conversation_id"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("#{}", index));

        match serde_json::from_value::<Conversation>(item) {
            Ok(conversation) => conversations.push(conversation),
            Err(e) => {
                warn!(conversation = %label, "Failed to parse conversation {}: {}", index, e);
                skipped_count += 1;
            }
        }
    }

    // Check if failure rate is too high
    if total > 0 {
        let failure_rate = (skipped_count as f64) / (total as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures: {} of {} conversations failed ({:.1}%)",
                skipped_count,
                total,
                failure_rate * 100.0
            );
        }
    }

    if skipped_count > 0 {
        info!("Parsed archive: {} conversations ({} skipped)", conversations.len(), skipped_count);
    }

    Ok(conversations)
}
