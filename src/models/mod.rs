//! Data models for exported conversation archives.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`Conversation`] - One conversation record from `conversations.json`
//! - [`Node`] - One entry of a conversation's node mapping
//! - [`Message`] / [`Author`] / [`Content`] - The message payload carried by a node
//! - [`NormalizedMessage`] - Flat, simplified view of a message with a teaser
//! - [`LinearEntry`] / [`BranchMarker`] - Elements of a linearized conversation
//!
//! Archive models use serde for JSON deserialization, with custom deserializers for
//! epoch timestamps in the `deserializers` module and a hand-written `Deserialize` for
//! the tagged content payload.

pub mod archive;
pub mod content;
pub mod normalized;

pub use archive::{Author, Conversation, Message, Node, NodeMapping};
pub use content::{Content, MultimodalPart};
pub use normalized::{BRANCH_TEASER, BranchMarker, LinearEntry, NormalizedMessage, SimplifiedContent};
