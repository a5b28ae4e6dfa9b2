// Player identity and the engine's per-player state record.
//
// Purpose
// - `Player` is supplied by the caller. Only `id` matters to the engine; other fields ride along.
// - `GamePlayer` is what the store keeps for each id: achievements and history, both append-only.
//
// Boundaries
// - Only a PlayerStore mutates a GamePlayer. The engine works on owned snapshots.

use crate::modules::achievements::core::events::{Achievement, Event, HistoryEntry, HistoryItem};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Player {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

// Hosts commonly hand out numeric ids; both `"7"` and `7` name the same player.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub id: String,
    pub achievements: Vec<Achievement>,
    pub history: Vec<HistoryItem>,
    pub player: Player,
}

impl GamePlayer {
    pub fn new(player: Player) -> Self {
        Self {
            id: player.id.clone(),
            achievements: Vec::new(),
            history: Vec::new(),
            player,
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.history.iter().filter_map(|item| match &item.entry {
            HistoryEntry::Event(event) => Some(event),
            HistoryEntry::Achievement(_) => None,
        })
    }

    pub fn count_events(&self, name: &str) -> usize {
        self.events().filter(|event| event.name == name).count()
    }

    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a.name == name)
    }
}

#[cfg(test)]
mod player_tests {
    use super::*;
    use crate::tests::fixtures::players::{make_player, timestamp};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn it_should_create_an_empty_game_player_with_the_player_id() {
        let player = make_player("p-1");
        let game_player = GamePlayer::new(player.clone());
        assert_eq!(game_player.id, "p-1");
        assert_eq!(game_player.player, player);
        assert!(game_player.achievements.is_empty());
        assert!(game_player.history.is_empty());
    }

    #[rstest]
    fn it_should_keep_caller_fields_next_to_the_id() {
        let player: Player = serde_json::from_value(json!({ "id": "p-1", "nickname": "teddy" }))
            .expect("player should deserialize");
        assert_eq!(player.id, "p-1");
        assert_eq!(player.fields.get("nickname"), Some(&json!("teddy")));

        let round = serde_json::to_value(&player).expect("player should serialize");
        assert_eq!(round, json!({ "id": "p-1", "nickname": "teddy" }));
    }

    #[rstest]
    #[case(json!({ "id": 1 }), "1")]
    #[case(json!({ "id": "1" }), "1")]
    #[case(json!({ "id": 42.5 }), "42.5")]
    fn it_should_accept_numeric_and_textual_ids(#[case] raw: Value, #[case] expected: &str) {
        let player: Player = serde_json::from_value(raw).expect("player should deserialize");
        assert_eq!(player.id, expected);
    }

    #[rstest]
    fn it_should_count_only_events_with_the_given_name() {
        let mut game_player = GamePlayer::new(make_player("p-1"));
        game_player
            .history
            .push(HistoryItem::event(Event::new("login"), timestamp(1)));
        game_player
            .history
            .push(HistoryItem::event(Event::new("logout"), timestamp(2)));
        game_player.history.push(HistoryItem::achievement(Achievement::new(
            "login",
            timestamp(3),
        )));
        game_player
            .history
            .push(HistoryItem::event(Event::new("login"), timestamp(4)));

        assert_eq!(game_player.count_events("login"), 2);
        assert_eq!(game_player.count_events("logout"), 1);
        assert_eq!(game_player.count_events("missing"), 0);
        assert_eq!(game_player.events().count(), 3);
    }
}
