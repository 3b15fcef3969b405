use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{labs, neuro, patient, vitals};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, paths};

/// CURB-65 community-acquired pneumonia severity, 0–5.
pub struct Curb65;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        neuro::ALTERED_MENTAL_STATUS,
        labs::UREA,
        vitals::RESPIRATORY_RATE,
        vitals::SYSTOLIC_BP,
        vitals::DIASTOLIC_BP,
        patient::AGE,
    ])
});

impl Scale for Curb65 {
    fn id(&self) -> &str {
        "curb65"
    }

    fn name(&self) -> &str {
        "CURB-65"
    }

    fn domain(&self) -> Domain {
        Domain::Infectiology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let confusion = snapshot.flag(neuro::ALTERED_MENTAL_STATUS);
        let urea = snapshot.measured(labs::UREA).is_some_and(|u| u > 7.0);
        let respiratory = snapshot
            .measured(vitals::RESPIRATORY_RATE)
            .is_some_and(|rr| rr >= 30.0);
        let pressure = snapshot.measured(vitals::SYSTOLIC_BP).is_some_and(|s| s < 90.0)
            || snapshot.measured(vitals::DIASTOLIC_BP).is_some_and(|d| d <= 60.0);
        let age = snapshot.measured(patient::AGE).is_some_and(|a| a >= 65.0);

        let total = [confusion, urea, respiratory, pressure, age]
            .into_iter()
            .filter(|c| *c)
            .count();

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64);
        let builder = match total {
            0 | 1 => builder
                .tier(RiskTier::Low)
                .interpretation(format!("CURB-65 {total}: low severity, 30-day mortality under 3%"))
                .recommend("Consider outpatient treatment"),
            2 => builder
                .tier(RiskTier::Intermediate)
                .interpretation("CURB-65 2: moderate severity, 30-day mortality about 9%")
                .recommend("Short inpatient admission or supervised outpatient care"),
            _ => builder
                .tier(RiskTier::High)
                .interpretation(format!(
                    "CURB-65 {total}: severe pneumonia, 30-day mortality 15-40%"
                ))
                .recommend("Hospital admission; assess for ICU care")
                .recommend("Start empirical antibiotics for severe pneumonia"),
        };
        builder.build()
    }
}
