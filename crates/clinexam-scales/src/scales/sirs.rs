use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{labs, vitals};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, paths};

/// Systemic inflammatory response syndrome criteria count (0–4).
pub struct Sirs;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        vitals::TEMPERATURE,
        vitals::HEART_RATE,
        vitals::RESPIRATORY_RATE,
        labs::WBC,
    ])
});

/// Names of the SIRS criteria currently met. Unrecorded vitals never count.
pub fn criteria(snapshot: &Snapshot) -> Vec<&'static str> {
    let mut met = Vec::new();
    if snapshot
        .measured(vitals::TEMPERATURE)
        .is_some_and(|t| !(36.0..=38.0).contains(&t))
    {
        met.push("temperature");
    }
    if snapshot.measured(vitals::HEART_RATE).is_some_and(|hr| hr > 90.0) {
        met.push("heart_rate");
    }
    if snapshot
        .measured(vitals::RESPIRATORY_RATE)
        .is_some_and(|rr| rr > 20.0)
    {
        met.push("respiratory_rate");
    }
    if snapshot
        .measured(labs::WBC)
        .is_some_and(|wbc| !(4.0..=12.0).contains(&wbc))
    {
        met.push("wbc");
    }
    met
}

pub fn criteria_met(snapshot: &Snapshot) -> bool {
    criteria(snapshot).len() >= 2
}

impl Scale for Sirs {
    fn id(&self) -> &str {
        "sirs"
    }

    fn name(&self) -> &str {
        "SIRS"
    }

    fn domain(&self) -> Domain {
        Domain::Infectiology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let met = criteria(snapshot);
        let count = met.len();
        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), count as f64);
        let builder = match count {
            0 | 1 => builder
                .tier(RiskTier::Low)
                .interpretation(format!("{count} SIRS criteria: criteria not met")),
            2 | 3 => builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!(
                    "{count} SIRS criteria met ({})",
                    met.join(", ")
                ))
                .recommend("Look for an infectious source and screen for sepsis"),
            _ => builder
                .tier(RiskTier::High)
                .interpretation("All four SIRS criteria met")
                .recommend("Look for an infectious source and screen for sepsis")
                .recommend("Measure lactate"),
        };
        builder.build()
    }
}
