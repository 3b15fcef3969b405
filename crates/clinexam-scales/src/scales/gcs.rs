use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::neuro;
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, ScoreRange, paths, read_clamped};

/// Glasgow Coma Scale: eye 1–4, verbal 1–5, motor 1–6. Total 3–15.
pub struct Gcs;

const EYE: ScoreRange = ScoreRange::graded(1.0, 4.0);
const VERBAL: ScoreRange = ScoreRange::graded(1.0, 5.0);
const MOTOR: ScoreRange = ScoreRange::graded(1.0, 6.0);

static INPUTS: LazyLock<Vec<String>> =
    LazyLock::new(|| paths(&[neuro::GCS_EYE, neuro::GCS_VERBAL, neuro::GCS_MOTOR]));

/// Total GCS, or `None` when no component has been recorded.
/// Unrecorded components are taken as normal.
pub fn glasgow_total(snapshot: &Snapshot) -> Option<f64> {
    if !INPUTS.iter().any(|p| snapshot.is_answered(p)) {
        return None;
    }
    let eye = read_clamped(snapshot, neuro::GCS_EYE, EYE, EYE.max);
    let verbal = read_clamped(snapshot, neuro::GCS_VERBAL, VERBAL, VERBAL.max);
    let motor = read_clamped(snapshot, neuro::GCS_MOTOR, MOTOR, MOTOR.max);
    Some(eye + verbal + motor)
}

impl Scale for Gcs {
    fn id(&self) -> &str {
        "gcs"
    }

    fn name(&self) -> &str {
        "Glasgow Coma Scale"
    }

    fn domain(&self) -> Domain {
        Domain::Neurology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let total = glasgow_total(snapshot).unwrap_or(15.0);
        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total);
        let builder = if total <= 8.0 {
            builder
                .tier(RiskTier::Critical)
                .interpretation(format!("GCS {total}: severe impairment"))
                .recommend("Secure the airway")
                .recommend("Urgent CT head")
        } else if total <= 12.0 {
            builder
                .tier(RiskTier::High)
                .interpretation(format!("GCS {total}: moderate impairment"))
                .recommend("Urgent CT head and neurological observations every 15 minutes")
        } else if total < 15.0 {
            builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!("GCS {total}: mild impairment"))
                .recommend("Repeat neurological observations hourly")
        } else {
            builder
                .tier(RiskTier::Low)
                .interpretation("GCS 15: fully alert")
        };
        builder.build()
    }
}
