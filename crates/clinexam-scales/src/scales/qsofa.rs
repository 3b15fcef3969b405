use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{neuro, vitals};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scales::gcs::glasgow_total;
use crate::scoring::{ScoreBuilder, paths};

/// Quick SOFA: one point each for SBP ≤100, RR ≥22, GCS <15.
pub struct Qsofa;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        vitals::SYSTOLIC_BP,
        vitals::RESPIRATORY_RATE,
        neuro::GCS_EYE,
        neuro::GCS_VERBAL,
        neuro::GCS_MOTOR,
    ])
});

pub fn points(snapshot: &Snapshot) -> u32 {
    let hypotension = snapshot
        .measured(vitals::SYSTOLIC_BP)
        .is_some_and(|sbp| sbp <= 100.0);
    let tachypnea = snapshot
        .measured(vitals::RESPIRATORY_RATE)
        .is_some_and(|rr| rr >= 22.0);
    let altered = glasgow_total(snapshot).unwrap_or(15.0) < 15.0;
    u32::from(hypotension) + u32::from(tachypnea) + u32::from(altered)
}

impl Scale for Qsofa {
    fn id(&self) -> &str {
        "qsofa"
    }

    fn name(&self) -> &str {
        "qSOFA"
    }

    fn domain(&self) -> Domain {
        Domain::Infectiology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let total = points(snapshot);
        let high_risk = total >= 2;
        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .flag("high_risk", high_risk);
        let builder = match total {
            0 => builder
                .tier(RiskTier::Low)
                .interpretation("qSOFA 0: low risk of poor outcome"),
            1 => builder
                .tier(RiskTier::Intermediate)
                .interpretation("qSOFA 1: monitor for deterioration")
                .recommend("Repeat vital signs and reassess"),
            _ => builder
                .tier(RiskTier::High)
                .interpretation(format!(
                    "qSOFA {total}: high risk of in-hospital mortality if infection is present"
                ))
                .recommend("Assess for organ dysfunction (full SOFA)")
                .recommend("Blood cultures, lactate, and antibiotics within one hour"),
        };
        builder.build()
    }
}
