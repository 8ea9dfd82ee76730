// src/engine/mod.rs
//! # Skill inference engine
//!
//! Turns a player's weekly snapshots (visible bands, rating, declared
//! training) into bounds on the hidden sub-levels inside each band.
//!
//! ## Pieces, leaves first
//! - `yields`    – training yield table (external data, read-only oracle).
//! - `interval`  – per-skill `[min, max]` sub-level bounds (`SpareSkills`).
//! - `tier`      – academy tier that best explains one rating change.
//! - `reconcile` – one snapshot pair: predict, check, narrow.
//! - `tracker`   – one player's whole history, ledger and final estimates.
//! - `predict`   – forward projection under a training plan.
//!
//! ## Data flow
//! ```text
//! DataSource ─▶ EntityTracker ─▶ Reconciler ─▶ TrainingYield
//!                    │                 └──────▶ SpareSkills
//!                    └─▶ Estimates + ledger
//! ```
//!
//! No I/O happens in here. Trackers own all of their state, so separate
//! players can be processed on separate threads without coordination.
pub mod error;
pub mod interval;
pub mod predict;
pub mod reconcile;
pub mod tier;
pub mod tracker;
pub mod types;
pub mod yields;

pub use error::EngineError;
pub use interval::{SkillInterval, SpareSkills};
pub use tracker::{EntityTracker, TrackerState};
pub use types::{Activity, Anomaly, Estimates, FacilityTier, LedgerEntry, Observation, Talent};
pub use yields::{TrainingYield, YieldTable};
