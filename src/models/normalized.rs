use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Teaser label carried by every branch marker
pub const BRANCH_TEASER: &str = "[branches]";

/// Flat, display-oriented view of a single message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMessage {
    pub id: String,
    pub teaser: String,
    pub author: String,
    pub content_type: String,
    #[serde(flatten)]
    pub fields: SimplifiedContent,
}

/// Kind-specific fields merged into a [`NormalizedMessage`] when serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimplifiedContent {
    Text { value: String },
    Code { text: String },
    MultimodalText { asset_pointer: String },
    ExecutionOutput { text: String },
    BrowsingDisplay { result: String },
    Quote { url: String, domain: String, text: String },
    SystemError { text: String },
    Unknown { original_content: Value },
}

/// One element of a linearized conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinearEntry {
    Message(NormalizedMessage),
    Branches(BranchMarker),
}

/// Split point where a message has several continuations.
///
/// Branches are kept in the order of the parent's child list and are named
/// `branch1`, `branch2`, ... when serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchMarker {
    branches: Vec<Vec<LinearEntry>>,
}

impl BranchMarker {
    pub fn new(branches: Vec<Vec<LinearEntry>>) -> Self {
        Self { branches }
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Branch names paired with their sequences, in child order
    pub fn iter(&self) -> impl Iterator<Item = (String, &[LinearEntry])> {
        self.branches
            .iter()
            .enumerate()
            .map(|(idx, branch)| (branch_name(idx), branch.as_slice()))
    }

    /// Look up a branch by its serialized name
    pub fn get(&self, name: &str) -> Option<&[LinearEntry]> {
        let index: usize = name.strip_prefix("branch")?.parse().ok()?;
        self.branches.get(index.checked_sub(1)?).map(Vec::as_slice)
    }
}

fn branch_name(idx: usize) -> String {
    format!("branch{}", idx + 1)
}

impl Serialize for BranchMarker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.branches.len() + 1))?;
        map.serialize_entry("teaser", BRANCH_TEASER)?;
        for (name, branch) in self.iter() {
            map.serialize_entry(&name, branch)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str) -> LinearEntry {
        LinearEntry::Message(NormalizedMessage {
            id: id.to_string(),
            teaser: format!("[text][user] {}", id),
            author: "user".to_string(),
            content_type: "text".to_string(),
            fields: SimplifiedContent::Text { value: id.to_string() },
        })
    }

    #[test]
    fn test_normalized_message_serializes_flat() {
        let value = serde_json::to_value(message("a")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "a",
                "teaser": "[text][user] a",
                "author": "user",
                "content_type": "text",
                "value": "a"
            })
        );
    }

    #[test]
    fn test_branch_lookup_by_name() {
        let marker = BranchMarker::new(vec![vec![message("a")], vec![], vec![message("c")]]);

        assert_eq!(marker.len(), 3);
        assert_eq!(marker.get("branch1").map(<[LinearEntry]>::len), Some(1));
        assert_eq!(marker.get("branch2").map(<[LinearEntry]>::len), Some(0));
        assert!(marker.get("branch0").is_none());
        assert!(marker.get("branch4").is_none());
        assert!(marker.get("other").is_none());
    }

    #[test]
    fn test_branch_marker_keeps_child_order_past_nine() {
        let marker = BranchMarker::new((0..11).map(|_| Vec::new()).collect());
        let yaml = serde_yaml::to_string(&marker).unwrap();

        let keys: Vec<&str> =
            yaml.lines().filter_map(|line| line.split(':').next()).collect();
        assert_eq!(keys[0], "teaser");
        assert_eq!(keys[1], "branch1");
        assert_eq!(keys[2], "branch2");
        assert_eq!(keys[10], "branch10");
        assert_eq!(keys[11], "branch11");
    }

    #[test]
    fn test_branch_marker_serializes_teaser_and_branches() {
        let marker = BranchMarker::new(vec![vec![message("a")], vec![]]);
        let value = serde_json::to_value(LinearEntry::Branches(marker)).unwrap();

        assert_eq!(value["teaser"], BRANCH_TEASER);
        assert_eq!(value["branch1"][0]["id"], "a");
        assert_eq!(value["branch2"], serde_json::json!([]));
    }
}
