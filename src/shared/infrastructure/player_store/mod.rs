// The player store port: what the engine needs from persistence, without implementing it.
//
// Responsibilities
// - Keep players, their history and their achievements, keyed by `Player::id`.
// - Hand out owned snapshots. Callers never hold a reference into store state.
//
// Boundaries
// - No rule logic here. Adapters implement this trait; the in memory one lives next door.

use crate::modules::achievements::core::events::{Achievement, Event, HistoryItem};
use crate::modules::achievements::core::player::{GamePlayer, Player};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("player store operation `{operation}` is not implemented")]
    NotImplemented { operation: &'static str },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Ensures a record exists for `player.id`. A known id gets its caller fields replaced;
    /// history and achievements are left untouched.
    async fn record_player(&self, player: &Player) -> Result<(), StoreError> {
        let _ = player;
        Err(StoreError::NotImplemented {
            operation: "record_player",
        })
    }

    async fn record_event(&self, player: &Player, event: &Event) -> Result<(), StoreError> {
        let _ = (player, event);
        Err(StoreError::NotImplemented {
            operation: "record_event",
        })
    }

    async fn record_achievement(
        &self,
        player: &Player,
        achievement: &Achievement,
    ) -> Result<(), StoreError> {
        let _ = (player, achievement);
        Err(StoreError::NotImplemented {
            operation: "record_achievement",
        })
    }

    /// `Ok(None)` when the id has never been seen.
    async fn get_player(&self, player: &Player) -> Result<Option<GamePlayer>, StoreError> {
        let _ = player;
        Err(StoreError::NotImplemented {
            operation: "get_player",
        })
    }

    async fn get_player_history(&self, player: &Player) -> Result<Vec<HistoryItem>, StoreError> {
        Ok(self
            .get_player(player)
            .await?
            .map(|game_player| game_player.history)
            .unwrap_or_default())
    }

    async fn get_player_achievements(
        &self,
        player: &Player,
    ) -> Result<Vec<Achievement>, StoreError> {
        Ok(self
            .get_player(player)
            .await?
            .map(|game_player| game_player.achievements)
            .unwrap_or_default())
    }
}

pub mod in_memory;
