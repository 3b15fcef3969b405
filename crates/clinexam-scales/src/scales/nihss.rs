use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::neuro::{self, nihss};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, ScoreRange, read_clamped};

/// NIH Stroke Scale, 13 independently scored items. Total 0–33 here.
pub struct Nihss;

/// Item path and its maximum score.
pub const ITEMS: [(&str, f64); 13] = [
    (nihss::CONSCIOUSNESS, 3.0),
    (nihss::QUESTIONS, 2.0),
    (nihss::COMMANDS, 2.0),
    (nihss::GAZE, 2.0),
    (nihss::VISUAL, 3.0),
    (nihss::FACIAL, 3.0),
    (nihss::MOTOR_ARM, 4.0),
    (nihss::MOTOR_LEG, 4.0),
    (nihss::ATAXIA, 2.0),
    (nihss::SENSORY, 2.0),
    (nihss::LANGUAGE, 3.0),
    (nihss::DYSARTHRIA, 2.0),
    (nihss::EXTINCTION, 2.0),
];

/// Thrombolysis time window in hours from last known well.
pub const THROMBOLYSIS_WINDOW_HOURS: f64 = 4.5;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut inputs: Vec<String> = ITEMS.iter().map(|(p, _)| p.to_string()).collect();
    inputs.push(neuro::ONSET_HOURS.to_string());
    inputs
});

pub fn total(snapshot: &Snapshot) -> u32 {
    ITEMS
        .iter()
        .map(|(path, max)| read_clamped(snapshot, path, ScoreRange::graded(0.0, *max), 0.0) as u32)
        .sum()
}

/// Onset recorded and within the thrombolysis window.
pub fn within_window(snapshot: &Snapshot) -> bool {
    snapshot
        .measured(neuro::ONSET_HOURS)
        .is_some_and(|h| h <= THROMBOLYSIS_WINDOW_HOURS)
}

/// Deficit severity in the thrombolysis range, inside the window, with no
/// recorded contraindication.
pub fn thrombolysis_eligible(snapshot: &Snapshot, total: u32) -> bool {
    (4..=25).contains(&total)
        && within_window(snapshot)
        && !snapshot.flag(neuro::INTRACRANIAL_HEMORRHAGE)
        && !snapshot.flag(neuro::ANTICOAGULATED)
}

impl Scale for Nihss {
    fn id(&self) -> &str {
        "nihss"
    }

    fn name(&self) -> &str {
        "NIHSS"
    }

    fn domain(&self) -> Domain {
        Domain::Neurology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let total = total(snapshot);
        let window = within_window(snapshot);
        let eligible = thrombolysis_eligible(snapshot, total);

        let (tier, severity) = match total {
            0 => (RiskTier::Low, "no stroke symptoms"),
            1..=4 => (RiskTier::Intermediate, "minor stroke"),
            5..=15 => (RiskTier::High, "moderate stroke"),
            16..=20 => (RiskTier::High, "moderate to severe stroke"),
            _ => (RiskTier::Critical, "severe stroke"),
        };

        let mut builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .flag("within_window", window)
            .flag("thrombolysis_eligible", eligible)
            .tier(tier)
            .interpretation(format!("NIHSS {total}: {severity}"));

        if eligible {
            builder = builder
                .recommend("Candidate for IV thrombolysis: confirm contraindications and treat within the window");
        } else if total > 0 && !window {
            builder = builder.recommend("Outside the thrombolysis window: assess for thrombectomy eligibility");
        }
        if total >= 6 {
            builder = builder.recommend("CT angiography for large vessel occlusion");
        }
        if total > 0 {
            builder = builder.recommend("Admit to a stroke unit");
        }
        builder.build()
    }
}
