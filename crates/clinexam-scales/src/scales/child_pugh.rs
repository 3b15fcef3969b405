use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, labs};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, ScoreRange, paths, read_clamped};

/// Child-Pugh: three laboratory sub-scores plus ascites and encephalopathy.
/// Each part scores 1–3 points, total 5–15, classes A/B/C.
pub struct ChildPugh;

const GRADE: ScoreRange = ScoreRange::graded(0.0, 3.0);

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        labs::BILIRUBIN,
        labs::ALBUMIN,
        labs::INR,
        gastro::ASCITES_GRADE,
        gastro::ENCEPHALOPATHY_GRADE,
    ])
});

/// Bilirubin in mg/dL. Missing counts as normal.
pub fn bilirubin_points(bilirubin: Option<f64>) -> u32 {
    match bilirubin {
        Some(b) if b > 3.0 => 3,
        Some(b) if b >= 2.0 => 2,
        _ => 1,
    }
}

/// Albumin in g/dL. Missing counts as normal.
pub fn albumin_points(albumin: Option<f64>) -> u32 {
    match albumin {
        Some(a) if a > 3.5 => 1,
        Some(a) if a >= 2.8 => 2,
        Some(_) => 3,
        None => 1,
    }
}

pub fn inr_points(inr: Option<f64>) -> u32 {
    match inr {
        Some(i) if i > 2.3 => 3,
        Some(i) if i >= 1.7 => 2,
        _ => 1,
    }
}

/// Ascites grade 0 none, 1 mild, 2–3 moderate to tense.
pub fn ascites_points(grade: f64) -> u32 {
    match grade as u32 {
        0 => 1,
        1 => 2,
        _ => 3,
    }
}

/// Encephalopathy grade 0 none, 1–2 controlled, 3 refractory.
pub fn encephalopathy_points(grade: f64) -> u32 {
    match grade as u32 {
        0 => 1,
        1 | 2 => 2,
        _ => 3,
    }
}

/// Class letter and risk tier for a total score.
pub fn classify(total: u32) -> (&'static str, RiskTier) {
    if total <= 6 {
        ("A", RiskTier::Low)
    } else if total <= 9 {
        ("B", RiskTier::Intermediate)
    } else {
        ("C", RiskTier::High)
    }
}

impl Scale for ChildPugh {
    fn id(&self) -> &str {
        "child_pugh"
    }

    fn name(&self) -> &str {
        "Child-Pugh"
    }

    fn domain(&self) -> Domain {
        Domain::Gastroenterology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let bilirubin = bilirubin_points(snapshot.measured(labs::BILIRUBIN));
        let albumin = albumin_points(snapshot.measured(labs::ALBUMIN));
        let inr = inr_points(snapshot.measured(labs::INR));
        let ascites = ascites_points(read_clamped(snapshot, gastro::ASCITES_GRADE, GRADE, 0.0));
        let encephalopathy =
            encephalopathy_points(read_clamped(snapshot, gastro::ENCEPHALOPATHY_GRADE, GRADE, 0.0));

        let total = bilirubin + albumin + inr + ascites + encephalopathy;
        let (class, tier) = classify(total);

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .component("bilirubin", bilirubin as f64)
            .component("albumin", albumin as f64)
            .component("inr", inr as f64)
            .component("ascites", ascites as f64)
            .component("encephalopathy", encephalopathy as f64)
            .tier(tier);

        let builder = match class {
            "A" => builder
                .interpretation(format!(
                    "Child-Pugh class A ({total} points): well-compensated disease"
                ))
                .recommend("Routine hepatology follow-up and variceal screening"),
            "B" => builder
                .interpretation(format!(
                    "Child-Pugh class B ({total} points): significant functional compromise"
                ))
                .recommend("Hepatology review and screening for varices")
                .recommend("Consider transplant referral"),
            _ => builder
                .interpretation(format!(
                    "Child-Pugh class C ({total} points): decompensated disease"
                ))
                .recommend("Urgent hepatology review")
                .recommend("Transplant evaluation"),
        };
        builder.build()
    }
}
