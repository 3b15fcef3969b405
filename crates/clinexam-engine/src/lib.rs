//! clinexam-engine
//!
//! Everything downstream of the scale calculators: the alert rule engine,
//! triage derivation, adaptive protocols, cross-validation and diagnostic
//! suspicion, and the progress tracker. `recompute` runs them in order over
//! one snapshot and returns a single coherent result.
//!
//! Every function here is pure. Rule tables are immutable statics.

pub mod alerts;
pub mod config;
pub mod cross_validation;
pub mod findings;
pub mod progress;
pub mod protocols;
pub mod recompute;
pub mod suspicion;

pub use alerts::{derive_triage_level, evaluate_alerts, evaluate_alerts_for};
pub use config::EngineConfig;
pub use cross_validation::{cross_validate, cross_validate_for};
pub use progress::compute_progress;
pub use protocols::{activate_protocols, activate_protocols_for};
pub use recompute::{Engine, recompute};
