//! Chat Archive YAML - Turn exported conversation archives into readable YAML
//!
//! An export stores each conversation as a graph: a mapping of nodes linked by
//! parent/child ids, where regenerated answers and edited prompts show up as nodes with
//! several children. This library:
//!
//! - Parses `conversations.json` into typed conversations
//! - Normalizes every message into a flat record with a short teaser line
//! - Linearizes each conversation graph into an ordered list, with explicit branch
//!   markers where the conversation forks
//! - Exports one YAML (or JSON) document per conversation, grouped by month
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_yaml::{build_document, parse_archive_file};
//! use std::path::Path;
//!
//! let conversations = parse_archive_file(Path::new("conversations.json"), 1 << 30)?;
//! for conversation in &conversations {
//!     let document = build_document(conversation)?;
//!     println!("{}: {} entries", document.title, document.messages.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod export;
pub mod linearize;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use export::{ConversationDocument, ExportConfig, OutputFormat, build_document, export_archive};
pub use linearize::{LinearizeError, linearize, linearize_conversation, normalize_message};
pub use models::{Conversation, LinearEntry, NormalizedMessage};
pub use parsers::{parse_archive, parse_archive_file};
pub use utils::paths::{format_path_with_tilde, slugify_title};
