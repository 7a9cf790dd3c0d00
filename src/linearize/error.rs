use thiserror::Error;

/// Structural violations that abort the linearization of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinearizeError {
    #[error("node {node_id} was reached twice (cycle or shared descendant)")]
    Revisited { node_id: String },

    #[error("node {node_id} has no message but is not the conversation root")]
    MissingMessage { node_id: String },

    #[error("node {node_id} is referenced but missing from the mapping")]
    NodeNotFound { node_id: String },

    #[error("mapping has no root node (no node without both message and parent)")]
    NoRoot,

    #[error("mapping has several root candidates: {}", candidates.join(", "))]
    AmbiguousRoot { candidates: Vec<String> },

    #[error("root node {node_id} has {child_count} children, expected at most one")]
    RootFanout { node_id: String, child_count: usize },
}
