use crate::modules::achievements::engine::GamificationEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GamificationEngine>,
}

impl AppState {
    pub fn new(engine: GamificationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
