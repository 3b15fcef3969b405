//! Composite findings shared by rules, protocols and checks.

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, infect, labs, vitals};

pub const FEVER_CELSIUS: f64 = 38.0;

/// Measured temperature ≥38 °C, or fever reported in the history.
pub fn fever(snapshot: &Snapshot) -> bool {
    snapshot
        .measured(vitals::TEMPERATURE)
        .is_some_and(|t| t >= FEVER_CELSIUS)
        || snapshot.flag(infect::REPORTED_FEVER)
}

/// Systolic BP below 90 mmHg, returning the reading.
pub fn hypotension(snapshot: &Snapshot) -> Option<f64> {
    snapshot
        .measured(vitals::SYSTOLIC_BP)
        .filter(|sbp| *sbp < 90.0)
}

pub fn below(snapshot: &Snapshot, path: &str, threshold: f64) -> bool {
    snapshot.measured(path).is_some_and(|v| v < threshold)
}

pub fn above(snapshot: &Snapshot, path: &str, threshold: f64) -> bool {
    snapshot.measured(path).is_some_and(|v| v > threshold)
}

/// RUQ pain either flagged directly or recorded as the pain location.
pub fn ruq_pain(snapshot: &Snapshot) -> bool {
    snapshot.flag(gastro::RUQ_PAIN) || snapshot.category(gastro::PAIN_LOCATION) == Some("ruq")
}

/// Any overt sign of gastrointestinal blood loss.
pub fn gi_bleeding(snapshot: &Snapshot) -> bool {
    snapshot.flag(gastro::HEMATEMESIS)
        || snapshot.flag(gastro::MELENA)
        || snapshot.flag(gastro::HEMATOCHEZIA)
}

pub fn lactate_above(snapshot: &Snapshot, threshold: f64) -> bool {
    above(snapshot, labs::LACTATE, threshold)
}
