use crate::shared::infrastructure::player_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("transient achievement rules are not supported yet (key `{key}`)")]
    UnsupportedRuleKind { key: String },
}
