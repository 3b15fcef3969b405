use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::hematology::wells;
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, count_flags, paths};

/// Wells criteria for deep vein thrombosis, −2 to 9.
pub struct WellsDvt;

const ONE_POINT: [&str; 9] = [
    wells::ACTIVE_CANCER,
    wells::PARALYSIS,
    wells::BEDRIDDEN,
    wells::LOCALIZED_TENDERNESS,
    wells::LEG_SWOLLEN,
    wells::CALF_SWELLING,
    wells::PITTING_EDEMA,
    wells::COLLATERAL_VEINS,
    wells::PREVIOUS_DVT,
];

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut inputs = paths(&ONE_POINT);
    inputs.push(wells::ALTERNATIVE_LIKELY.to_string());
    inputs
});

impl Scale for WellsDvt {
    fn id(&self) -> &str {
        "wells_dvt"
    }

    fn name(&self) -> &str {
        "Wells DVT"
    }

    fn domain(&self) -> Domain {
        Domain::Hematology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let mut total = count_flags(snapshot, &ONE_POINT) as i32;
        if snapshot.flag(wells::ALTERNATIVE_LIKELY) {
            total -= 2;
        }

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64);
        let builder = if total >= 3 {
            builder
                .tier(RiskTier::High)
                .interpretation(format!("Wells {total}: high pretest probability of DVT"))
                .recommend("Compression ultrasound without delay")
                .recommend("Consider empirical anticoagulation while awaiting imaging")
        } else if total >= 1 {
            builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!("Wells {total}: moderate pretest probability of DVT"))
                .recommend("D-dimer; ultrasound if positive")
        } else {
            builder
                .tier(RiskTier::Low)
                .interpretation(format!("Wells {total}: low pretest probability of DVT"))
                .recommend("D-dimer to exclude DVT")
        };
        builder.build()
    }
}
