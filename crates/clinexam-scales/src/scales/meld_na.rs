use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, labs};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, paths, round_to};

/// MELD-Na: Model for End-Stage Liver Disease with sodium correction.
/// Reported score is clamped to 6–40.
pub struct MeldNa;

pub const SODIUM_FLOOR: f64 = 125.0;
pub const SODIUM_CEILING: f64 = 137.0;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        labs::BILIRUBIN,
        labs::INR,
        labs::CREATININE,
        labs::SODIUM,
        gastro::DIALYSIS,
    ])
});

/// Pre-sodium MELD. Every logarithm argument is floored at 1.
pub fn meld(bilirubin: f64, inr: f64, creatinine: f64, dialysis: bool) -> f64 {
    let meld = 3.78 * bilirubin.max(1.0).ln()
        + 11.2 * inr.max(1.0).ln()
        + 9.57 * creatinine.max(1.0).ln()
        + 6.43;
    if dialysis { meld.max(40.0) } else { meld }
}

/// Sodium-corrected score, clamped to [6, 40] and rounded.
pub fn meld_na(meld: f64, sodium: f64) -> f64 {
    let na = sodium.max(SODIUM_FLOOR).min(SODIUM_CEILING);
    let gap = SODIUM_CEILING - na;
    let score = meld + 1.32 * gap - 0.033 * meld * gap;
    score.max(6.0).min(40.0).round()
}

impl Scale for MeldNa {
    fn id(&self) -> &str {
        "meld_na"
    }

    fn name(&self) -> &str {
        "MELD-Na"
    }

    fn domain(&self) -> Domain {
        Domain::Gastroenterology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let dialysis = snapshot.flag(gastro::DIALYSIS);
        let base = meld(
            snapshot.measured(labs::BILIRUBIN).unwrap_or(1.0),
            snapshot.measured(labs::INR).unwrap_or(1.0),
            snapshot.measured(labs::CREATININE).unwrap_or(1.0),
            dialysis,
        );
        let sodium = snapshot
            .measured(labs::SODIUM)
            .unwrap_or(SODIUM_CEILING)
            .max(SODIUM_FLOOR)
            .min(SODIUM_CEILING);
        let score = meld_na(base, sodium);

        let (tier, mortality) = if score < 10.0 {
            (RiskTier::Low, "about 2%")
        } else if score < 20.0 {
            (RiskTier::Intermediate, "about 6%")
        } else if score < 30.0 {
            (RiskTier::High, "about 20%")
        } else if score < 40.0 {
            (RiskTier::Critical, "about 53%")
        } else {
            (RiskTier::Critical, "about 71%")
        };

        let mut builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), score)
            .component("meld", round_to(base, 2))
            .component("sodium", sodium)
            .flag("dialysis", dialysis)
            .interpretation(format!(
                "MELD-Na {score}: estimated 90-day mortality {mortality}"
            ))
            .tier(tier);

        if score >= 15.0 {
            builder = builder.recommend("Refer for liver transplant evaluation");
        }
        if score >= 30.0 {
            builder = builder.recommend("Prioritize transplant listing and ICU-level monitoring");
        }
        if score < 15.0 {
            builder = builder.recommend("Reassess MELD-Na with each new laboratory panel");
        }
        builder.build()
    }
}
