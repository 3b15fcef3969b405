use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, labs, neuro, patient, vitals};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scales::sirs;
use crate::scoring::{ScoreBuilder, paths};

/// BISAP: bedside index of severity in acute pancreatitis, 0–5.
pub struct Bisap;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        labs::BUN,
        neuro::ALTERED_MENTAL_STATUS,
        vitals::TEMPERATURE,
        vitals::HEART_RATE,
        vitals::RESPIRATORY_RATE,
        labs::WBC,
        patient::AGE,
        gastro::PLEURAL_EFFUSION,
    ])
});

impl Scale for Bisap {
    fn id(&self) -> &str {
        "bisap"
    }

    fn name(&self) -> &str {
        "BISAP"
    }

    fn domain(&self) -> Domain {
        Domain::Gastroenterology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let bun = snapshot.measured(labs::BUN).is_some_and(|b| b > 25.0);
        let mental = snapshot.flag(neuro::ALTERED_MENTAL_STATUS);
        let sirs = sirs::criteria_met(snapshot);
        let age = snapshot.measured(patient::AGE).is_some_and(|a| a > 60.0);
        let effusion = snapshot.flag(gastro::PLEURAL_EFFUSION);

        let total = [bun, mental, sirs, age, effusion]
            .into_iter()
            .filter(|c| *c)
            .count();

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .flag("bun", bun)
            .flag("impaired_mental_status", mental)
            .flag("sirs", sirs)
            .flag("age", age)
            .flag("pleural_effusion", effusion);

        let builder = match total {
            0 | 1 => builder
                .tier(RiskTier::Low)
                .interpretation(format!("BISAP {total}: mortality under 1%")),
            2 => builder
                .tier(RiskTier::Intermediate)
                .interpretation("BISAP 2: mortality about 2%")
                .recommend("Monitor fluid balance and reassess within 24 hours"),
            _ => builder
                .tier(RiskTier::High)
                .interpretation(format!(
                    "BISAP {total}: predicted severe acute pancreatitis, mortality above 5%"
                ))
                .recommend("Aggressive fluid resuscitation")
                .recommend("Consider ICU or high-dependency admission"),
        };
        builder.build()
    }
}
