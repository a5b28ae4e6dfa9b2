// Event submission orchestrates the write flow for one incoming event.
//
// Responsibilities
// - Record the event through the store.
// - Announce it to event subscribers.
// - Evaluate every rule against the fresh player state and return what was awarded.

use crate::modules::achievements::core::events::{Achievement, Event};
use crate::modules::achievements::core::player::Player;
use crate::modules::achievements::engine::GamificationEngine;
use crate::modules::achievements::errors::EngineError;
use crate::modules::achievements::notifications::Notification;

impl GamificationEngine {
    pub async fn add_event(
        &self,
        player: &Player,
        event_name: impl Into<String>,
    ) -> Result<Vec<Achievement>, EngineError> {
        self.submit_event(player, Event::new(event_name)).await
    }

    /// Events are never deduplicated: every submission is recorded and evaluated.
    pub async fn submit_event(
        &self,
        player: &Player,
        event: Event,
    ) -> Result<Vec<Achievement>, EngineError> {
        self.store.record_event(player, &event).await?;
        tracing::debug!(player = %player.id, event = %event.name, "event recorded");

        self.notifier
            .publish(&Notification::EventOccurred {
                player,
                event: &event,
                engine: self,
            })
            .await;

        if self.store.get_player(player).await?.is_none() {
            tracing::debug!(player = %player.id, "player missing after event, evaluation skipped");
            return Ok(Vec::new());
        }

        self.evaluate_achievements(player).await
    }
}
