use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use gamification::modules::achievements::engine::GamificationEngine;
use gamification::modules::achievements::notifications::Notification;
use gamification::shared::infrastructure::player_store::in_memory::InMemoryPlayerStore;
use gamification::shell::config::AppConfig;
use gamification::shell::http::router;
use gamification::shell::rule_definitions::load_rules;
use gamification::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    let rules = match &config.rules_path {
        Some(path) => load_rules(path)?,
        None => Vec::new(),
    };
    tracing::info!(rules = rules.len(), "achievement rules loaded");

    // In-memory store for now
    let engine =
        GamificationEngine::with_store(Arc::new(InMemoryPlayerStore::new())).with_rules(rules);
    engine
        .on_achievement_achieved(|notification| {
            if let Notification::AchievementAchieved {
                player, achievement, ..
            } = notification
            {
                tracing::info!(
                    player = %player.id,
                    achievement = %achievement.name,
                    "player unlocked an achievement"
                );
            }
            Ok(())
        })
        .await;

    let app = router(AppState::new(engine)).layer(TraceLayer::new_for_http());

    tracing::info!("gamification endpoint: http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
