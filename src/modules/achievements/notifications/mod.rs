// Publish/subscribe for the two things the engine announces.
//
// Responsibilities
// - Keep an ordered list of subscribers per notification kind.
// - Deliver each notification to every matching subscriber in registration order.
// - Contain subscriber failures: an error or panic is logged and the next subscriber still runs.

use crate::modules::achievements::core::events::{Achievement, Event};
use crate::modules::achievements::core::player::Player;
use crate::modules::achievements::engine::GamificationEngine;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    EventOccurred,
    AchievementAchieved,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::EventOccurred => "event-occurred",
            NotificationKind::AchievementAchieved => "achievement-achieved",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct UnknownNotificationKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event-occurred" => Ok(NotificationKind::EventOccurred),
            "achievement-achieved" => Ok(NotificationKind::AchievementAchieved),
            other => Err(UnknownNotificationKind(other.to_string())),
        }
    }
}

pub enum Notification<'a> {
    EventOccurred {
        player: &'a Player,
        event: &'a Event,
        engine: &'a GamificationEngine,
    },
    AchievementAchieved {
        player: &'a Player,
        achievement: &'a Achievement,
        engine: &'a GamificationEngine,
    },
}

impl Notification<'_> {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::EventOccurred { .. } => NotificationKind::EventOccurred,
            Notification::AchievementAchieved { .. } => NotificationKind::AchievementAchieved,
        }
    }

    pub fn player(&self) -> &Player {
        match self {
            Notification::EventOccurred { player, .. }
            | Notification::AchievementAchieved { player, .. } => player,
        }
    }

    pub fn engine(&self) -> &GamificationEngine {
        match self {
            Notification::EventOccurred { engine, .. }
            | Notification::AchievementAchieved { engine, .. } => engine,
        }
    }
}

type Listener = dyn Fn(&Notification<'_>) -> anyhow::Result<()> + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Clone)]
struct Subscription {
    id: SubscriptionId,
    kind: NotificationKind,
    listener: Arc<Listener>,
}

#[derive(Default)]
pub struct Notifier {
    next_id: AtomicU64,
    subscriptions: RwLock<Vec<Subscription>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe<F>(&self, kind: NotificationKind, listener: F) -> SubscriptionId
    where
        F: Fn(&Notification<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions.write().await.push(Subscription {
            id,
            kind,
            listener: Arc::new(listener),
        });
        tracing::debug!(%kind, subscription = %id, "subscriber registered");
        id
    }

    /// Returns whether a subscription with this id was removed.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|subscription| subscription.id != id);
        before != subscriptions.len()
    }

    pub async fn subscriber_count(&self, kind: NotificationKind) -> usize {
        self.subscriptions
            .read()
            .await
            .iter()
            .filter(|subscription| subscription.kind == kind)
            .count()
    }

    pub async fn publish(&self, notification: &Notification<'_>) {
        let kind = notification.kind();
        // Dispatch from a snapshot so subscribers may (un)subscribe while being notified.
        let targets: Vec<Subscription> = self
            .subscriptions
            .read()
            .await
            .iter()
            .filter(|subscription| subscription.kind == kind)
            .cloned()
            .collect();

        for subscription in targets {
            match catch_unwind(AssertUnwindSafe(|| (subscription.listener)(notification))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!(
                    %kind,
                    subscription = %subscription.id,
                    error = %err,
                    "subscriber failed"
                ),
                Err(_) => tracing::warn!(
                    %kind,
                    subscription = %subscription.id,
                    "subscriber panicked"
                ),
            }
        }
    }
}
