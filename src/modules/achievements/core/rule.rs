// Achievement rules: which key(s) a rule awards, how often, and when.
//
// Purpose
// - Describe a rule as a value: key, multiplicity, transience and a predicate.
// - Resolve a rule's key into the ordered list of achievement names it may award.
//
// Boundaries
// - No storage access here. Rules only see the snapshot and engine handed to them.
// - A rule without a key or predicate cannot be built; see `AchievementRuleBuilder::build`.

use crate::modules::achievements::core::player::GamePlayer;
use crate::modules::achievements::engine::GamificationEngine;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule key is not implemented")]
    MissingKey,

    #[error("rule predicate is not implemented")]
    MissingPredicate,
}

/// A resolved key: one achievement name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    One(String),
    Many(Vec<String>),
}

impl KeyValue {
    pub fn into_keys(self) -> Vec<String> {
        match self {
            KeyValue::One(key) => vec![key],
            KeyValue::Many(keys) => keys,
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::One(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::One(value)
    }
}

impl From<Vec<String>> for KeyValue {
    fn from(value: Vec<String>) -> Self {
        KeyValue::Many(value)
    }
}

impl From<Vec<&str>> for KeyValue {
    fn from(value: Vec<&str>) -> Self {
        KeyValue::Many(value.into_iter().map(str::to_string).collect())
    }
}

type KeyFn = dyn Fn(&GamePlayer, &GamificationEngine) -> KeyValue + Send + Sync;

#[derive(Clone)]
pub enum RuleKey {
    Literal(KeyValue),
    Dynamic(Arc<KeyFn>),
}

impl RuleKey {
    /// A key computed from the player's state at evaluation time, e.g. a date-stamped name.
    pub fn dynamic<F, K>(resolve: F) -> Self
    where
        F: Fn(&GamePlayer, &GamificationEngine) -> K + Send + Sync + 'static,
        K: Into<KeyValue>,
    {
        RuleKey::Dynamic(Arc::new(
            move |player: &GamePlayer, engine: &GamificationEngine| -> KeyValue {
                resolve(player, engine).into()
            },
        ))
    }

    pub fn resolve(&self, player: &GamePlayer, engine: &GamificationEngine) -> Vec<String> {
        match self {
            RuleKey::Literal(value) => value.clone().into_keys(),
            RuleKey::Dynamic(resolve) => resolve(player, engine).into_keys(),
        }
    }
}

impl fmt::Debug for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKey::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            RuleKey::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<KeyValue> for RuleKey {
    fn from(value: KeyValue) -> Self {
        RuleKey::Literal(value)
    }
}

impl From<&str> for RuleKey {
    fn from(value: &str) -> Self {
        RuleKey::Literal(value.into())
    }
}

impl From<String> for RuleKey {
    fn from(value: String) -> Self {
        RuleKey::Literal(value.into())
    }
}

impl From<Vec<String>> for RuleKey {
    fn from(value: Vec<String>) -> Self {
        RuleKey::Literal(value.into())
    }
}

impl From<Vec<&str>> for RuleKey {
    fn from(value: Vec<&str>) -> Self {
        RuleKey::Literal(value.into())
    }
}

/// How many times one key may be awarded to a player. Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplicity(u32);

impl Multiplicity {
    pub const fn unlimited() -> Self {
        Self(0)
    }

    pub const fn once() -> Self {
        Self(1)
    }

    pub const fn at_most(times: u32) -> Self {
        Self(times)
    }

    pub fn limit(self) -> Option<u32> {
        (self.0 > 0).then_some(self.0)
    }

    pub fn is_unlimited(self) -> bool {
        self.0 == 0
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::once()
    }
}

impl From<u32> for Multiplicity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[async_trait]
pub trait AchievementPredicate: Send + Sync {
    async fn is_satisfied(&self, player: &GamePlayer, engine: &GamificationEngine) -> bool;
}

struct FnPredicate<F>(F);

#[async_trait]
impl<F> AchievementPredicate for FnPredicate<F>
where
    F: Fn(&GamePlayer, &GamificationEngine) -> bool + Send + Sync,
{
    async fn is_satisfied(&self, player: &GamePlayer, engine: &GamificationEngine) -> bool {
        (self.0)(player, engine)
    }
}

#[derive(Clone)]
pub struct AchievementRule {
    key: RuleKey,
    multiplicity: Multiplicity,
    transient: bool,
    predicate: Arc<dyn AchievementPredicate>,
}

impl AchievementRule {
    pub fn builder() -> AchievementRuleBuilder {
        AchievementRuleBuilder::default()
    }

    /// Award-once, non-transient rule.
    pub fn new<F>(key: impl Into<RuleKey>, predicate: F) -> Self
    where
        F: Fn(&GamePlayer, &GamificationEngine) -> bool + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            multiplicity: Multiplicity::default(),
            transient: false,
            predicate: Arc::new(FnPredicate(predicate)),
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: impl Into<Multiplicity>) -> Self {
        self.multiplicity = multiplicity.into();
        self
    }

    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    pub fn key(&self) -> &RuleKey {
        &self.key
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn resolve_keys(&self, player: &GamePlayer, engine: &GamificationEngine) -> Vec<String> {
        self.key.resolve(player, engine)
    }

    pub async fn is_satisfied(&self, player: &GamePlayer, engine: &GamificationEngine) -> bool {
        self.predicate.is_satisfied(player, engine).await
    }
}

impl fmt::Debug for AchievementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AchievementRule")
            .field("key", &self.key)
            .field("multiplicity", &self.multiplicity)
            .field("transient", &self.transient)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct AchievementRuleBuilder {
    key: Option<RuleKey>,
    multiplicity: Multiplicity,
    transient: bool,
    predicate: Option<Arc<dyn AchievementPredicate>>,
}

impl AchievementRuleBuilder {
    pub fn key(mut self, key: impl Into<RuleKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn dynamic_key<F, K>(mut self, resolve: F) -> Self
    where
        F: Fn(&GamePlayer, &GamificationEngine) -> K + Send + Sync + 'static,
        K: Into<KeyValue>,
    {
        self.key = Some(RuleKey::dynamic(resolve));
        self
    }

    pub fn multiplicity(mut self, multiplicity: impl Into<Multiplicity>) -> Self {
        self.multiplicity = multiplicity.into();
        self
    }

    pub fn transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&GamePlayer, &GamificationEngine) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(FnPredicate(predicate)));
        self
    }

    /// For predicates that need to await, e.g. a remote lookup.
    pub fn async_predicate(mut self, predicate: impl AchievementPredicate + 'static) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn build(self) -> Result<AchievementRule, RuleError> {
        let key = self.key.ok_or(RuleError::MissingKey)?;
        let predicate = self.predicate.ok_or(RuleError::MissingPredicate)?;
        Ok(AchievementRule {
            key,
            multiplicity: self.multiplicity,
            transient: self.transient,
            predicate,
        })
    }
}
