use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{self, rheum};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, ScoreRange, read_clamped};

/// ACR 2010 fibromyalgia criteria: widespread pain index plus symptom
/// severity.
pub struct Fibromyalgia;

/// Seventeen widespread-pain regions, keyed under `rheum.fibro.regions`.
pub const REGIONS: [&str; 17] = [
    "left_jaw",
    "right_jaw",
    "left_shoulder_girdle",
    "right_shoulder_girdle",
    "left_upper_arm",
    "right_upper_arm",
    "left_lower_arm",
    "right_lower_arm",
    "left_hip",
    "right_hip",
    "left_upper_leg",
    "right_upper_leg",
    "left_lower_leg",
    "right_lower_leg",
    "neck",
    "upper_back",
    "lower_back",
];

const GRADED: ScoreRange = ScoreRange::graded(0.0, 3.0);

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut inputs: Vec<String> = REGIONS.iter().map(|r| region_path(r)).collect();
    inputs.extend(
        [
            rheum::FIBRO_FATIGUE,
            rheum::FIBRO_WAKING_UNREFRESHED,
            rheum::FIBRO_COGNITIVE,
            rheum::FIBRO_SOMATIC_COUNT,
        ]
        .iter()
        .map(|p| p.to_string()),
    );
    inputs
});

pub fn region_path(region: &str) -> String {
    fields::join(rheum::FIBRO_REGIONS, region)
}

/// Somatic symptom count banded to 0–3.
pub fn somatic_band(count: u32) -> u32 {
    match count {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        _ => 3,
    }
}

pub fn criteria_met(wpi: u32, ss: u32) -> bool {
    (wpi >= 7 && ss >= 5) || (wpi >= 3 && ss >= 9)
}

pub fn widespread_pain_index(snapshot: &Snapshot) -> u32 {
    REGIONS
        .iter()
        .filter(|r| snapshot.flag(&region_path(r)))
        .count() as u32
}

pub fn symptom_severity(snapshot: &Snapshot) -> u32 {
    let graded: f64 = [
        rheum::FIBRO_FATIGUE,
        rheum::FIBRO_WAKING_UNREFRESHED,
        rheum::FIBRO_COGNITIVE,
    ]
    .iter()
    .map(|p| read_clamped(snapshot, p, GRADED, 0.0))
    .sum();
    let somatic = snapshot
        .number(rheum::FIBRO_SOMATIC_COUNT)
        .unwrap_or(0.0)
        .max(0.0)
        .round() as u32;
    graded as u32 + somatic_band(somatic)
}

impl Scale for Fibromyalgia {
    fn id(&self) -> &str {
        "fibromyalgia"
    }

    fn name(&self) -> &str {
        "Fibromyalgia (ACR 2010)"
    }

    fn domain(&self) -> Domain {
        Domain::Rheumatology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let wpi = widespread_pain_index(snapshot);
        let ss = symptom_severity(snapshot);
        let met = criteria_met(wpi, ss);
        let total = wpi + ss;

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .component("wpi", wpi as f64)
            .component("ss", ss as f64)
            .flag("criteria_met", met);

        let builder = if met {
            builder
                .tier(RiskTier::High)
                .interpretation(format!("WPI {wpi}, SS {ss}: fibromyalgia criteria met"))
                .recommend("Confirm symptoms have persisted at least 3 months")
                .recommend("Exclude alternative causes of widespread pain")
        } else if total >= 12 {
            builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!(
                    "WPI {wpi}, SS {ss}: criteria not met despite substantial symptom burden"
                ))
                .recommend("Reassess at follow-up")
        } else {
            builder
                .tier(RiskTier::Low)
                .interpretation(format!("WPI {wpi}, SS {ss}: fibromyalgia criteria not met"))
        };
        builder.build()
    }
}
