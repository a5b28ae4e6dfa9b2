// Declarative rules for the host application.
//
// A rules file is a JSON array. Each entry awards `key` once the player's history holds at least
// `min_count` events named `event`:
//
//   [{ "key": "first-login", "event": "login" },
//    { "key": ["regular", "loyal"], "event": "login", "min_count": 10, "multiplicity": 1 }]

use crate::modules::achievements::core::player::GamePlayer;
use crate::modules::achievements::core::rule::{AchievementRule, KeyValue, Multiplicity};
use crate::modules::achievements::engine::GamificationEngine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleFileError {
    #[error("cannot read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    pub key: KeyValue,
    pub event: String,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default)]
    pub multiplicity: Multiplicity,
    #[serde(default)]
    pub transient: bool,
}

fn default_min_count() -> usize {
    1
}

impl RuleDefinition {
    pub fn into_rule(self) -> AchievementRule {
        let RuleDefinition {
            key,
            event,
            min_count,
            multiplicity,
            transient,
        } = self;
        AchievementRule::new(key, move |player: &GamePlayer, _: &GamificationEngine| {
            player.count_events(&event) >= min_count
        })
        .with_multiplicity(multiplicity)
        .with_transient(transient)
    }
}

pub fn parse_rules(json: &str) -> Result<Vec<AchievementRule>, RuleFileError> {
    let definitions: Vec<RuleDefinition> = serde_json::from_str(json)?;
    Ok(definitions
        .into_iter()
        .map(RuleDefinition::into_rule)
        .collect())
}

pub fn load_rules(path: &Path) -> Result<Vec<AchievementRule>, RuleFileError> {
    let json = std::fs::read_to_string(path).map_err(|source| RuleFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&json)
}

#[cfg(test)]
mod rule_definitions_tests {
    use super::*;
    use crate::tests::fixtures::players::make_player;
    use rstest::rstest;

    #[rstest]
    fn it_should_apply_defaults() {
        let definition: RuleDefinition =
            serde_json::from_str(r#"{ "key": "first-login", "event": "login" }"#).unwrap();
        assert_eq!(definition.key, KeyValue::One("first-login".into()));
        assert_eq!(definition.min_count, 1);
        assert_eq!(definition.multiplicity, Multiplicity::once());
        assert!(!definition.transient);
    }

    #[rstest]
    fn it_should_accept_a_key_list_and_explicit_multiplicity() {
        let definition: RuleDefinition = serde_json::from_str(
            r#"{ "key": ["a", "b"], "event": "login", "min_count": 3, "multiplicity": 0 }"#,
        )
        .unwrap();
        assert_eq!(definition.key, KeyValue::Many(vec!["a".into(), "b".into()]));
        assert_eq!(definition.min_count, 3);
        assert!(definition.multiplicity.is_unlimited());
    }

    #[rstest]
    fn it_should_reject_unknown_fields() {
        let result = parse_rules(r#"[{ "key": "a", "event": "login", "when": "always" }]"#);
        assert!(matches!(result, Err(RuleFileError::Parse(_))));
    }

    #[rstest]
    fn it_should_report_a_missing_file() {
        let result = load_rules(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(RuleFileError::Io { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_award_once_the_event_count_is_reached() {
        let rules = parse_rules(r#"[{ "key": "regular", "event": "login", "min_count": 2 }]"#)
            .unwrap();
        let engine = GamificationEngine::new().with_rules(rules);
        let player = make_player("p-1");

        assert!(engine.add_event(&player, "login").await.unwrap().is_empty());
        assert!(engine.add_event(&player, "logout").await.unwrap().is_empty());
        let awarded = engine.add_event(&player, "login").await.unwrap();
        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].name, "regular");
        assert!(engine.add_event(&player, "login").await.unwrap().is_empty());
    }
}
