// Things that happen to a player, and the history that records them.
//
// Versioning and evolution
// - Prefer additive changes. History items are persisted by adapters; do not change the meaning of
//   existing variants.

use crate::shared::core::primitives::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub achieved: Timestamp,
}

impl Achievement {
    pub fn new(name: impl Into<String>, achieved: Timestamp) -> Self {
        Self {
            name: name.into(),
            achieved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HistoryEntry {
    Event(Event),
    Achievement(Achievement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub occurred_at: Timestamp,
    pub entry: HistoryEntry,
}

impl HistoryItem {
    pub fn event(event: Event, occurred_at: Timestamp) -> Self {
        Self {
            occurred_at,
            entry: HistoryEntry::Event(event),
        }
    }

    /// Achievements are stamped with the moment they were earned, not when they were stored.
    pub fn achievement(achievement: Achievement) -> Self {
        Self {
            occurred_at: achievement.achieved,
            entry: HistoryEntry::Achievement(achievement),
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self.entry, HistoryEntry::Event(_))
    }

    pub fn is_achievement(&self) -> bool {
        matches!(self.entry, HistoryEntry::Achievement(_))
    }
}

#[cfg(test)]
mod history_item_tests {
    use super::*;
    use crate::tests::fixtures::players::timestamp;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn it_should_stamp_an_achievement_item_with_the_achieved_time() {
        let achieved = timestamp(1_700_000_000_000);
        let item = HistoryItem::achievement(Achievement::new("first-login", achieved));
        assert_eq!(item.occurred_at, achieved);
        assert!(item.is_achievement());
        assert!(!item.is_event());
    }

    #[rstest]
    fn it_should_tag_history_entries_by_kind() {
        let item = HistoryItem::event(
            Event::with_payload("login", json!({ "device": "phone" })),
            timestamp(0),
        );
        let value = serde_json::to_value(&item).expect("history item should serialize");
        assert_eq!(value["entry"]["kind"], json!("event"));
        assert_eq!(value["entry"]["value"]["name"], json!("login"));
        assert_eq!(value["entry"]["value"]["payload"]["device"], json!("phone"));
    }

    #[rstest]
    fn it_should_omit_a_missing_payload() {
        let value = serde_json::to_value(Event::new("login")).expect("event should serialize");
        assert_eq!(value, json!({ "name": "login" }));
    }
}
