use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{labs, rheum};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, ScoreRange, paths, read_clamped, round_to};

/// DAS28-CRP disease activity score over 28 joints.
pub struct Das28Crp;

const JOINTS: ScoreRange = ScoreRange::graded(0.0, 28.0);
const GLOBAL: ScoreRange = ScoreRange::new(0.0, 100.0);

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        rheum::TENDER_JOINTS,
        rheum::SWOLLEN_JOINTS,
        labs::CRP,
        rheum::PATIENT_GLOBAL,
    ])
});

/// `0.56·√TJC + 0.28·√SJC + 0.36·ln(CRP+1) + 0.014·PGA + 0.96`, CRP in mg/L.
pub fn das28(tender: f64, swollen: f64, crp: f64, global: f64) -> f64 {
    0.56 * tender.max(0.0).sqrt()
        + 0.28 * swollen.max(0.0).sqrt()
        + 0.36 * (crp.max(0.0) + 1.0).ln()
        + 0.014 * global
        + 0.96
}

impl Scale for Das28Crp {
    fn id(&self) -> &str {
        "das28_crp"
    }

    fn name(&self) -> &str {
        "DAS28-CRP"
    }

    fn domain(&self) -> Domain {
        Domain::Rheumatology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let tender = read_clamped(snapshot, rheum::TENDER_JOINTS, JOINTS, 0.0);
        let swollen = read_clamped(snapshot, rheum::SWOLLEN_JOINTS, JOINTS, 0.0);
        let crp = snapshot.number(labs::CRP).unwrap_or(0.0).max(0.0);
        let global = read_clamped(snapshot, rheum::PATIENT_GLOBAL, GLOBAL, 0.0);
        let score = round_to(das28(tender, swollen, crp, global), 2);

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), score)
            .component("tender_joints", tender)
            .component("swollen_joints", swollen)
            .component("crp", crp)
            .component("patient_global", global);

        let builder = if score <= 2.6 {
            builder
                .tier(RiskTier::Low)
                .interpretation(format!("DAS28-CRP {score}: remission"))
                .recommend("Maintain current therapy")
        } else if score <= 3.2 {
            builder
                .tier(RiskTier::Low)
                .interpretation(format!("DAS28-CRP {score}: low disease activity"))
                .recommend("Continue treat-to-target follow-up")
        } else if score <= 5.1 {
            builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!("DAS28-CRP {score}: moderate disease activity"))
                .recommend("Consider DMARD optimization")
        } else {
            builder
                .tier(RiskTier::High)
                .interpretation(format!("DAS28-CRP {score}: high disease activity"))
                .recommend("Escalate DMARD or biologic therapy")
                .recommend("Reassess within 4 to 6 weeks")
        };
        builder.build()
    }
}
