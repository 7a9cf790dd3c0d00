use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::Conversation;

/// `YYYY-MM` bucket a timestamp falls into
pub fn month_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m").to_string()
}

/// Group conversations by the month they were created in.
///
/// Months are ordered chronologically; within a month conversations are ordered by
/// creation time, then by id so that equal timestamps stay deterministic.
pub fn group_by_month(conversations: &[Conversation]) -> BTreeMap<String, Vec<&Conversation>> {
    let mut groups: BTreeMap<String, Vec<&Conversation>> = BTreeMap::new();
    for conversation in conversations {
        groups.entry(month_key(&conversation.create_time)).or_default().push(conversation);
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| a.create_time.cmp(&b.create_time).then_with(|| a.id.cmp(&b.id)));
    }

    groups
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn conversation(id: &str, created: i64) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: Some(id.to_string()),
            create_time: DateTime::from_timestamp(created, 0).unwrap(),
            update_time: None,
            mapping: HashMap::new(),
            current_node: None,
        }
    }

    #[test]
    fn test_month_key() {
        let timestamp = DateTime::from_timestamp(1_706_745_599, 0).unwrap(); // 2024-01-31 23:59:59
        assert_eq!(month_key(&timestamp), "2024-01");
        let next = DateTime::from_timestamp(1_706_745_600, 0).unwrap();
        assert_eq!(month_key(&next), "2024-02");
    }

    #[test]
    fn test_group_by_month_orders_months_and_members() {
        let conversations = vec![
            conversation("late-jan", 1_706_000_000),
            conversation("feb", 1_707_000_000),
            conversation("early-jan", 1_704_200_000),
            conversation("dec", 1_703_000_000),
        ];

        let groups = group_by_month(&conversations);
        let months: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);

        let january: Vec<&str> = groups["2024-01"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(january, vec!["early-jan", "late-jan"]);
    }

    #[test]
    fn test_group_by_month_ties_break_on_id() {
        let conversations = vec![conversation("b", 1_704_200_000), conversation("a", 1_704_200_000)];

        let groups = group_by_month(&conversations);
        let ids: Vec<&str> = groups["2024-01"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_group_by_month_empty() {
        assert!(group_by_month(&[]).is_empty());
    }
}
