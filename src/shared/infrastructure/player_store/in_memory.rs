// In memory implementation of the PlayerStore port.
//
// Purpose
// - Default store for the engine and the reference for tests. Nothing survives a restart.
//
// Responsibilities
// - Keep one GamePlayer per id, created on first sight. Re-registration replaces the caller
//   fields only.
// - Return clones so callers can never reach into the map.

use crate::modules::achievements::core::events::{Achievement, Event, HistoryItem};
use crate::modules::achievements::core::player::{GamePlayer, Player};
use crate::shared::core::primitives::now;
use crate::shared::infrastructure::player_store::{PlayerStore, StoreError};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryPlayerStore {
    inner: RwLock<HashMap<String, GamePlayer>>,
    offline: bool,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with a backend error.
    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("player store offline".into()));
        }
        Ok(())
    }
}

fn entry_for<'a>(
    players: &'a mut HashMap<String, GamePlayer>,
    player: &Player,
) -> &'a mut GamePlayer {
    players.entry(player.id.clone()).or_insert_with(|| {
        tracing::debug!(player = %player.id, "player created");
        GamePlayer::new(player.clone())
    })
}

#[async_trait::async_trait]
impl PlayerStore for InMemoryPlayerStore {
    /// Re-registering an id refreshes the caller fields and keeps history and achievements.
    async fn record_player(&self, player: &Player) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut players = self.inner.write().await;
        if let Some(existing) = players.get_mut(&player.id) {
            existing.player = player.clone();
            tracing::debug!(player = %player.id, "player fields refreshed");
        } else {
            entry_for(&mut players, player);
        }
        Ok(())
    }

    async fn record_event(&self, player: &Player, event: &Event) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut players = self.inner.write().await;
        let game_player = entry_for(&mut players, player);
        game_player
            .history
            .push(HistoryItem::event(event.clone(), now()));
        tracing::debug!(
            player = %player.id,
            event = %event.name,
            history_len = game_player.history.len(),
            "event appended"
        );
        Ok(())
    }

    async fn record_achievement(
        &self,
        player: &Player,
        achievement: &Achievement,
    ) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut players = self.inner.write().await;
        let game_player = entry_for(&mut players, player);
        game_player
            .history
            .push(HistoryItem::achievement(achievement.clone()));
        game_player.achievements.push(achievement.clone());
        tracing::debug!(
            player = %player.id,
            achievement = %achievement.name,
            held = game_player.achievements.len(),
            "achievement appended"
        );
        Ok(())
    }

    async fn get_player(&self, player: &Player) -> Result<Option<GamePlayer>, StoreError> {
        self.ensure_online()?;
        Ok(self.inner.read().await.get(&player.id).cloned())
    }
}
