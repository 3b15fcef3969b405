use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{self, rheum};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::ScoreBuilder;

/// SLEDAI-2K: weighted sum of 24 lupus activity descriptors.
pub struct Sledai2k;

/// Descriptor key (under `rheum.sledai`) and weight.
pub const DESCRIPTORS: [(&str, u32); 24] = [
    ("seizure", 8),
    ("psychosis", 8),
    ("organic_brain_syndrome", 8),
    ("visual_disturbance", 8),
    ("cranial_nerve_disorder", 8),
    ("lupus_headache", 8),
    ("cva", 8),
    ("vasculitis", 8),
    ("arthritis", 4),
    ("myositis", 4),
    ("urinary_casts", 4),
    ("hematuria", 4),
    ("proteinuria", 4),
    ("pyuria", 4),
    ("rash", 2),
    ("alopecia", 2),
    ("mucosal_ulcers", 2),
    ("pleurisy", 2),
    ("pericarditis", 2),
    ("low_complement", 2),
    ("increased_dna_binding", 2),
    ("fever", 1),
    ("thrombocytopenia", 1),
    ("leukopenia", 1),
];

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    DESCRIPTORS
        .iter()
        .map(|(key, _)| descriptor_path(key))
        .collect()
});

pub fn descriptor_path(key: &str) -> String {
    fields::join(rheum::SLEDAI, key)
}

impl Scale for Sledai2k {
    fn id(&self) -> &str {
        "sledai_2k"
    }

    fn name(&self) -> &str {
        "SLEDAI-2K"
    }

    fn domain(&self) -> Domain {
        Domain::Rheumatology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let present: Vec<(&str, u32)> = DESCRIPTORS
            .iter()
            .copied()
            .filter(|(key, _)| snapshot.flag(&descriptor_path(key)))
            .collect();
        let total: u32 = present.iter().map(|(_, weight)| weight).sum();
        let neuro: u32 = present
            .iter()
            .filter(|(_, weight)| *weight == 8)
            .map(|(_, weight)| weight)
            .sum();

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .component("descriptors", present.len() as f64)
            .component("neuro_vascular", neuro as f64);

        let builder = match total {
            0 => builder
                .tier(RiskTier::Low)
                .interpretation("SLEDAI-2K 0: no activity"),
            1..=5 => builder
                .tier(RiskTier::Low)
                .interpretation(format!("SLEDAI-2K {total}: mild activity"))
                .recommend("Routine rheumatology follow-up"),
            6..=10 => builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!("SLEDAI-2K {total}: moderate activity"))
                .recommend("Review immunosuppressive therapy"),
            11..=19 => builder
                .tier(RiskTier::High)
                .interpretation(format!("SLEDAI-2K {total}: high activity"))
                .recommend("Escalate immunosuppression")
                .recommend("Screen for organ involvement"),
            _ => builder
                .tier(RiskTier::Critical)
                .interpretation(format!("SLEDAI-2K {total}: very high activity"))
                .recommend("Urgent rheumatology review; consider admission"),
        };
        builder.build()
    }
}
