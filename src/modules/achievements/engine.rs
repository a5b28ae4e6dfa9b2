// The engine ties the store, the rule list and the notifier together.
//
// Responsibilities
// - Own the injected PlayerStore, the ordered rule list and the Notifier.
// - Expose the player-facing API. Event submission and rule evaluation live in their use case
//   modules as further `impl GamificationEngine` blocks.
//
// Concurrency
// - Concurrent `add_event` calls for the same player are not serialized here. Hosts that need
//   per-player atomicity must serialize at the store or hold a lock keyed by player id.

use crate::modules::achievements::core::events::{Achievement, HistoryItem};
use crate::modules::achievements::core::player::{GamePlayer, Player};
use crate::modules::achievements::core::rule::AchievementRule;
use crate::modules::achievements::errors::EngineError;
use crate::modules::achievements::notifications::{
    Notification, NotificationKind, Notifier, SubscriptionId,
};
use crate::shared::infrastructure::player_store::PlayerStore;
use crate::shared::infrastructure::player_store::in_memory::InMemoryPlayerStore;
use std::sync::Arc;

pub struct GamificationEngine {
    pub(crate) store: Arc<dyn PlayerStore>,
    pub(crate) rules: Vec<AchievementRule>,
    pub(crate) notifier: Notifier,
}

impl Default for GamificationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GamificationEngine {
    /// Engine backed by a fresh in memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryPlayerStore::new()))
    }

    pub fn with_store(store: Arc<dyn PlayerStore>) -> Self {
        Self {
            store,
            rules: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = AchievementRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn store(&self) -> &Arc<dyn PlayerStore> {
        &self.store
    }

    pub fn rules(&self) -> &[AchievementRule] {
        &self.rules
    }

    /// Rules are evaluated in the order they were added. Nothing is validated here beyond what
    /// `AchievementRule` already enforces on construction.
    pub fn add_achievement_rule(&mut self, rule: AchievementRule) {
        tracing::debug!(key = ?rule.key(), "achievement rule added");
        self.rules.push(rule);
    }

    pub async fn add_player(&self, player: &Player) -> Result<(), EngineError> {
        self.store.record_player(player).await?;
        Ok(())
    }

    pub async fn get_player(&self, player: &Player) -> Result<Option<GamePlayer>, EngineError> {
        Ok(self.store.get_player(player).await?)
    }

    pub async fn get_player_history(
        &self,
        player: &Player,
    ) -> Result<Vec<HistoryItem>, EngineError> {
        Ok(self.store.get_player_history(player).await?)
    }

    pub async fn get_player_achievements(
        &self,
        player: &Player,
    ) -> Result<Vec<Achievement>, EngineError> {
        Ok(self.store.get_player_achievements(player).await?)
    }

    pub async fn subscribe<F>(&self, kind: NotificationKind, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.notifier.subscribe(kind, listener).await
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id).await
    }

    // Aliases. Each one delegates to `subscribe` / `unsubscribe`.

    pub async fn on<F>(&self, kind: NotificationKind, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(kind, listener).await
    }

    pub async fn off(&self, id: SubscriptionId) -> bool {
        self.unsubscribe(id).await
    }

    pub async fn on_event_occurred<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(NotificationKind::EventOccurred, listener).await
    }

    pub async fn on_achievement_achieved<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(NotificationKind::AchievementAchieved, listener)
            .await
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

#[cfg(test)]
mod gamification_engine_tests {
    use super::*;
    use crate::modules::achievements::core::events::Event;
    use crate::shared::infrastructure::player_store::StoreError;
    use crate::tests::fixtures::players::make_player;
    use crate::tests::fixtures::rules::always;
    use rstest::{fixture, rstest};

    #[fixture]
    fn engine() -> GamificationEngine {
        GamificationEngine::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_register_a_player_idempotently(engine: GamificationEngine) {
        let player = make_player("p-1");
        engine.add_player(&player).await.unwrap();
        engine.add_event(&player, "login").await.unwrap();
        let before = engine.get_player(&player).await.unwrap();

        engine.add_player(&player).await.unwrap();
        let after = engine.get_player(&player).await.unwrap();

        assert_eq!(before, after);
        assert_eq!(after.map(|p| p.history.len()), Some(1));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_an_unknown_player_as_missing(engine: GamificationEngine) {
        let ghost = make_player("ghost");
        assert_eq!(engine.get_player(&ghost).await, Ok(None));
        assert_eq!(engine.get_player_history(&ghost).await, Ok(vec![]));
        assert_eq!(engine.get_player_achievements(&ghost).await, Ok(vec![]));
    }

    #[rstest]
    fn it_should_keep_rules_in_registration_order() {
        let mut engine = GamificationEngine::new().with_rules([always("a"), always("b")]);
        engine.add_achievement_rule(always("c"));

        let player = GamePlayer::new(make_player("p"));
        let keys: Vec<String> = engine
            .rules()
            .iter()
            .flat_map(|rule| rule.resolve_keys(&player, &engine))
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_store_failures() {
        let mut store = InMemoryPlayerStore::new();
        store.toggle_offline();
        let engine = GamificationEngine::with_store(Arc::new(store));

        let result = engine.add_player(&make_player("p-1")).await;
        assert_eq!(
            result,
            Err(EngineError::Store(StoreError::Backend(
                "player store offline".into()
            )))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "backend error: player store offline"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_route_aliases_to_the_same_subscription_list(engine: GamificationEngine) {
        let a = engine.on(NotificationKind::EventOccurred, |_| Ok(())).await;
        let b = engine.on_event_occurred(|_| Ok(())).await;
        engine.on_achievement_achieved(|_| Ok(())).await;

        let notifier = engine.notifier();
        assert_eq!(notifier.subscriber_count(NotificationKind::EventOccurred).await, 2);
        assert_eq!(
            notifier
                .subscriber_count(NotificationKind::AchievementAchieved)
                .await,
            1
        );

        assert!(engine.off(a).await);
        assert!(engine.unsubscribe(b).await);
        assert_eq!(notifier.subscriber_count(NotificationKind::EventOccurred).await, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_expose_the_injected_store(engine: GamificationEngine) {
        let player = make_player("p-1");
        engine
            .store()
            .record_event(&player, &Event::new("imported"))
            .await
            .unwrap();
        assert_eq!(engine.get_player_history(&player).await.unwrap().len(), 1);
    }
}
