// Shared test fixtures for achievement rules.

use crate::modules::achievements::core::rule::AchievementRule;

pub fn always(key: &str) -> AchievementRule {
    AchievementRule::new(key, |_, _| true)
}

pub fn never(key: &str) -> AchievementRule {
    AchievementRule::new(key, |_, _| false)
}
