// src/engine/error.rs
use thiserror::Error;

use super::tracker::TrackerState;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("no observations for player {0}")]
    NoObservations(u64),

    #[error("observation for player {found} given to the tracker of player {expected}")]
    EntityMismatch { expected: u64, found: u64 },

    #[error("tracker is {state:?}; cannot {action}")]
    InvalidState { state: TrackerState, action: &'static str },

    /// Neither the talent row nor the talent-agnostic row exists.
    /// This is a defect in the yield table, not in the data.
    #[error("no yield row '{key}' (talent-agnostic fallback also missing)")]
    MissingYieldRow { key: String },

    #[error("yield row '{key}' has no columns for age {age}")]
    MissingYieldAge { key: String, age: u32 },
}
