// Achievement evaluation: turns the current player state into zero or more new awards.
//
// Responsibilities
// - Run every rule in registration order, and every resolved key of a rule in list order.
// - Skip keys whose multiplicity is already used up, then ask the predicate.
// - Record each award through the store and announce it.
//
// Visibility
// - Player state is re-read from the store before each rule-key check. An award made earlier in
//   the pass is therefore seen by later keys and later rules, both by the multiplicity guard and
//   by predicates.

use crate::modules::achievements::core::events::Achievement;
use crate::modules::achievements::core::player::Player;
use crate::modules::achievements::engine::GamificationEngine;
use crate::modules::achievements::errors::EngineError;
use crate::modules::achievements::notifications::Notification;
use crate::modules::achievements::use_cases::evaluate_achievements::multiplicity_guard::multiplicity_reached;
use crate::shared::core::primitives::now;

impl GamificationEngine {
    /// Returns the achievements awarded by this pass, in award order. An unknown player yields
    /// no awards.
    pub async fn evaluate_achievements(
        &self,
        player: &Player,
    ) -> Result<Vec<Achievement>, EngineError> {
        let mut awarded = Vec::new();

        for rule in &self.rules {
            let Some(state) = self.store.get_player(player).await? else {
                tracing::debug!(player = %player.id, "player not found, skipping evaluation");
                return Ok(awarded);
            };

            for key in rule.resolve_keys(&state, self) {
                let Some(state) = self.store.get_player(player).await? else {
                    return Ok(awarded);
                };

                if multiplicity_reached(&state, &key, rule.multiplicity()) {
                    tracing::trace!(player = %player.id, %key, "multiplicity reached");
                    continue;
                }

                if !rule.is_satisfied(&state, self).await {
                    continue;
                }

                if rule.is_transient() {
                    return Err(EngineError::UnsupportedRuleKind { key });
                }

                let achievement = Achievement::new(key, now());
                self.store.record_achievement(player, &achievement).await?;
                tracing::info!(player = %player.id, achievement = %achievement.name, "achievement awarded");

                self.notifier
                    .publish(&Notification::AchievementAchieved {
                        player,
                        achievement: &achievement,
                        engine: self,
                    })
                    .await;
                awarded.push(achievement);
            }
        }

        Ok(awarded)
    }
}
