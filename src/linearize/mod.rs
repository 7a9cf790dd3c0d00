//! Conversation linearization: node mapping in, ordered entries with branch markers out.
//!
//! # Error Handling Strategy
//!
//! Structural problems in a conversation graph are reported as [`LinearizeError`]:
//!
//! - **Revisited node**: a node reachable through two paths (cycle or shared descendant)
//! - **Missing message**: a message-less node anywhere but the placeholder root
//! - **Dangling reference**: a child id that is not a key of the mapping
//!
//! Each of these aborts the whole conversation; there is no partial result. Callers decide
//! whether to skip the conversation or stop (the exporter skips and reports it).
//!
//! Unknown content kinds are never errors; the normalizer passes their payload through.

pub mod error;
pub mod normalizer;
pub mod summary;
pub mod tree;

pub use error::LinearizeError;
pub use normalizer::{TEASER_WIDTH, normalize_message};
pub use summary::SequenceSummary;
pub use tree::{LinearSequence, find_root, linearize, linearize_conversation};
