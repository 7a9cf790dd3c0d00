//! Exporting linearized conversations to disk
//!
//! # Error Handling Strategy
//!
//! The exporter combines graceful degradation with error rate tracking:
//!
//! - **Conversation-level failures**: A conversation whose graph is structurally broken
//!   (see [`crate::linearize::LinearizeError`]) is logged with its id and skipped.
//!
//! - **Error rate tracking**: Returns an error if >50% of conversations fail.
//!
//! - **I/O failures**: Failing to write an output file aborts the export immediately.
//!
//! The linearizer itself never touches the filesystem; all side effects happen here,
//! after a document has been fully built.

pub mod document;
pub mod grouping;
pub mod writer;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{info, warn};

pub use document::{ConversationDocument, build_document, format_timestamp};
pub use grouping::{group_by_month, month_key};
pub use writer::{
    OutputFormat, document_file_name, encode_document, unique_document_file_name, write_document,
};

use crate::models::Conversation;
use crate::parsers::parse_archive_file;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "chat-archive-export";

/// Default archive size limit in megabytes
pub const DEFAULT_MAX_SIZE_MB: u64 = 1024;

/// Settings for one `convert` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub archive_path: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub max_file_bytes: u64,
}

impl ExportConfig {
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            max_file_bytes: DEFAULT_MAX_SIZE_MB * 1024 * 1024,
        }
    }
}

/// Outcome of an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written, in month then creation order
    pub files: Vec<PathBuf>,
    /// Conversations written per `YYYY-MM` month
    pub months: BTreeMap<String, usize>,
    /// Conversations skipped because their graph was malformed
    pub failed: usize,
}

impl ExportSummary {
    pub fn written(&self) -> usize {
        self.files.len()
    }
}

/// Parse the archive named in `config` and export every conversation
pub fn export_archive(config: &ExportConfig) -> Result<ExportSummary> {
    let conversations = parse_archive_file(&config.archive_path, config.max_file_bytes)?;
    export_conversations(&conversations, &config.output_dir, config.format)
}

/// Write one document per conversation into `<output_dir>/<YYYY-MM>/`
///
/// # Errors
///
/// Returns an error if more than 50% of the conversations cannot be linearized, or if
/// any output file cannot be written.
pub fn export_conversations(
    conversations: &[Conversation],
    output_dir: &Path,
    format: OutputFormat,
) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();
    // File names embed the full date, so one set covers every month directory
    let mut taken = HashSet::new();

    for (month, group) in group_by_month(conversations) {
        let month_dir = output_dir.join(&month);

        for conversation in group {
            let document = match build_document(conversation) {
                Ok(document) => document,
                Err(e) => {
                    warn!(conversation = %conversation.id, "Skipping conversation: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            let file_name = unique_document_file_name(conversation, format, &taken);
            if file_name != document_file_name(conversation, format) {
                warn!(conversation = %conversation.id, "File name already in use, writing {}", file_name);
            }
            let path = month_dir.join(&file_name);
            taken.insert(file_name);
            write_document(&path, &encode_document(&document, format)?)?;

            *summary.months.entry(month.clone()).or_default() += 1;
            summary.files.push(path);
        }
    }

    let total = conversations.len();
    if total > 0 {
        let failure_rate = summary.failed as f64 / total as f64;
        if failure_rate > 0.5 {
            bail!(
                "Export failed: {}/{} conversations could not be linearized ({}% failure rate)",
                summary.failed,
                total,
                (failure_rate * 100.0) as u32
            );
        }
    }

    info!(
        "Exported {} conversations into {} months ({} skipped)",
        summary.written(),
        summary.months.len(),
        summary.failed
    );

    Ok(summary)
}

/// Find a conversation by id and build its document
pub fn find_document(conversations: &[Conversation], id: &str) -> Result<ConversationDocument> {
    let Some(conversation) = conversations.iter().find(|c| c.id == id) else {
        bail!("Conversation not found: {}", id);
    };

    Ok(build_document(conversation)?)
}
