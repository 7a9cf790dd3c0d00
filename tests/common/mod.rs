//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

pub const ARCHIVE_FILE_NAME: &str = "conversations.json";

/// Builder for a temporary directory holding a conversations.json archive
pub struct ArchiveBuilder {
    temp_dir: TempDir,
}

impl ArchiveBuilder {
    /// Create a new builder with an empty temp directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write conversations.json with raw content
    pub fn with_raw(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(ARCHIVE_FILE_NAME), content)
            .expect("Failed to write conversations.json");
        self
    }

    /// Write conversations.json from builders
    pub fn with_conversations(self, conversations: &[ConversationBuilder]) -> Self {
        let archive = Value::Array(conversations.iter().map(ConversationBuilder::to_value).collect());
        let content = serde_json::to_string_pretty(&archive).expect("Failed to encode archive");
        self.with_raw(&content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of the archive inside a built temp directory
pub fn archive_path(dir: &TempDir) -> PathBuf {
    dir.path().join(ARCHIVE_FILE_NAME)
}

/// Builder for one conversation and its node mapping
///
/// Nodes are added in order; `root` adds the message-less placeholder node.
pub struct ConversationBuilder {
    id: String,
    title: Option<String>,
    create_time: f64,
    update_time: Option<f64>,
    nodes: Vec<(String, Value)>,
}

impl ConversationBuilder {
    /// Create a conversation created on 2024-01-15 10:30:00 UTC
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: Some(format!("Conversation {}", id)),
            create_time: 1_705_314_600.0,
            update_time: None,
            nodes: Vec::new(),
        }
    }

    pub fn title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(ToString::to_string);
        self
    }

    pub fn create_time(mut self, seconds: f64) -> Self {
        self.create_time = seconds;
        self
    }

    pub fn update_time(mut self, seconds: f64) -> Self {
        self.update_time = Some(seconds);
        self
    }

    /// Add the placeholder root node
    pub fn root(self, id: &str, children: &[&str]) -> Self {
        self.node(id, Value::Null, None, children)
    }

    /// Add a text message node
    pub fn text(self, id: &str, role: &str, text: &str, parent: &str, children: &[&str]) -> Self {
        let message = json!({
            "id": id,
            "author": {"role": role, "name": null, "metadata": {}},
            "create_time": 1_705_314_600.0,
            "update_time": null,
            "content": {"content_type": "text", "parts": [text]},
            "status": "finished_successfully",
            "metadata": {}
        });
        self.node(id, message, Some(parent), children)
    }

    /// Add a node whose message has an arbitrary author and content payload
    pub fn message(
        self,
        id: &str,
        author: Value,
        content: Value,
        parent: &str,
        children: &[&str],
    ) -> Self {
        let message = json!({
            "id": id,
            "author": author,
            "create_time": null,
            "content": content,
            "metadata": {}
        });
        self.node(id, message, Some(parent), children)
    }

    /// Add a node with a raw message value (use `Value::Null` for no message)
    pub fn node(mut self, id: &str, message: Value, parent: Option<&str>, children: &[&str]) -> Self {
        let node = json!({
            "id": id,
            "message": message,
            "parent": parent,
            "children": children,
        });
        self.nodes.push((id.to_string(), node));
        self
    }

    /// Convert to a JSON value shaped like an export record
    pub fn to_value(&self) -> Value {
        let mapping: serde_json::Map<String, Value> = self.nodes.iter().cloned().collect();
        json!({
            "id": self.id,
            "conversation_id": self.id,
            "title": self.title,
            "create_time": self.create_time,
            "update_time": self.update_time,
            "mapping": mapping,
            "current_node": self.nodes.last().map(|(id, _)| id.clone()),
            "is_archived": false,
        })
    }
}

/// A question with two regenerated answers, the second followed by a further exchange
///
/// ```text
/// root -> q1 -> a1 (leaf)
///            -> a2 -> q2 -> a3 (leaf)
/// ```
pub fn branching_conversation(id: &str) -> ConversationBuilder {
    ConversationBuilder::new(id)
        .root("root", &["q1"])
        .text("q1", "user", "What is a borrow checker?", "root", &["a1", "a2"])
        .text("a1", "assistant", "First answer", "q1", &[])
        .text("a2", "assistant", "Second answer\nwith details", "q1", &["q2"])
        .text("q2", "user", "Thanks!", "a2", &["a3"])
        .text("a3", "assistant", "You're welcome", "q2", &[])
}

/// A straight chain of `turns` text messages under a placeholder root
pub fn chain_conversation(id: &str, turns: usize) -> ConversationBuilder {
    let ids: Vec<String> = (0..turns).map(|i| format!("m{}", i)).collect();
    let mut builder = ConversationBuilder::new(id).root("root", &[ids[0].as_str()]);
    for (i, node_id) in ids.iter().enumerate() {
        let parent = if i == 0 { "root".to_string() } else { ids[i - 1].clone() };
        let role = if i % 2 == 0 { "user" } else { "assistant" };
        let children: Vec<&str> = ids.get(i + 1).map(String::as_str).into_iter().collect();
        builder = builder.text(node_id, role, &format!("turn {}", i), &parent, &children);
    }
    builder
}
