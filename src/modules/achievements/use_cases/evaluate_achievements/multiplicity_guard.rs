use crate::modules::achievements::core::player::GamePlayer;
use crate::modules::achievements::core::rule::Multiplicity;

/// True when `player` already holds `key` as many times as `multiplicity` allows.
/// Counting stops at the limit; unlimited keys are never capped.
pub fn multiplicity_reached(player: &GamePlayer, key: &str, multiplicity: Multiplicity) -> bool {
    let Some(limit) = multiplicity.limit() else {
        return false;
    };
    let limit = limit as usize;
    let held = player
        .achievements
        .iter()
        .filter(|achievement| achievement.name == key)
        .take(limit)
        .count();
    held >= limit
}
