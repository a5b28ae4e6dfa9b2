pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod player_store;
    }
}

pub mod modules {
    pub mod achievements {
        pub mod core {
            pub mod events;
            pub mod player;
            pub mod rule;
        }
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
        }
        pub mod engine;
        pub mod errors;
        pub mod notifications;
        pub mod use_cases {
            pub mod evaluate_achievements {
                pub mod handler;
                pub mod multiplicity_guard;
            }
            pub mod submit_event {
                pub mod handler;
            }
        }
    }
}

pub mod shell;

pub use modules::achievements::core::events::{Achievement, Event, HistoryEntry, HistoryItem};
pub use modules::achievements::core::player::{GamePlayer, Player};
pub use modules::achievements::core::rule::{
    AchievementPredicate, AchievementRule, KeyValue, Multiplicity, RuleError, RuleKey,
};
pub use modules::achievements::engine::GamificationEngine;
pub use modules::achievements::errors::EngineError;
pub use modules::achievements::notifications::{
    Notification, NotificationKind, Notifier, SubscriptionId,
};
pub use shared::infrastructure::player_store::in_memory::InMemoryPlayerStore;
pub use shared::infrastructure::player_store::{PlayerStore, StoreError};
