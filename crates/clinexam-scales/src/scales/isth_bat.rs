use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{hematology, patient};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, paths};

/// ISTH bleeding assessment tool, condensed to three categories.
///
/// A category scores the heaviest item checked in it; items within one
/// category never add up. The total is the sum of the category maxima.
pub struct IsthBat;

pub const CUTANEOUS: &[(&str, u32)] = &[
    ("petechiae", 1),
    ("bruising", 1),
    ("large_bruises", 2),
    ("hematoma", 3),
];

pub const MUCOSAL: &[(&str, u32)] = &[
    ("epistaxis", 1),
    ("gum_bleeding", 2),
    ("menorrhagia", 3),
    ("gi_bleeding", 4),
];

pub const SURGICAL: &[(&str, u32)] = &[
    ("tooth_extraction", 2),
    ("post_operative", 3),
    ("postpartum", 3),
    ("transfusion_required", 4),
];

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        hematology::BLEEDING_CUTANEOUS,
        hematology::BLEEDING_MUCOSAL,
        hematology::BLEEDING_SURGICAL,
    ])
});

/// Heaviest weight among the selected items. Unknown labels are ignored.
pub fn category_score(selected: &[String], items: &[(&str, u32)]) -> u32 {
    selected
        .iter()
        .filter_map(|label| {
            items
                .iter()
                .find(|(key, _)| *key == label.as_str())
                .map(|(_, weight)| *weight)
        })
        .max()
        .unwrap_or(0)
}

/// Score at or above which bleeding is considered abnormal.
pub fn abnormal_threshold(snapshot: &Snapshot) -> u32 {
    if snapshot.measured(patient::AGE).is_some_and(|age| age < 18.0) {
        3
    } else if snapshot.category(patient::SEX) == Some("female") {
        6
    } else {
        4
    }
}

impl Scale for IsthBat {
    fn id(&self) -> &str {
        "isth_bat"
    }

    fn name(&self) -> &str {
        "ISTH-BAT"
    }

    fn domain(&self) -> Domain {
        Domain::Hematology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let cutaneous = category_score(snapshot.selection(hematology::BLEEDING_CUTANEOUS), CUTANEOUS);
        let mucosal = category_score(snapshot.selection(hematology::BLEEDING_MUCOSAL), MUCOSAL);
        let surgical = category_score(snapshot.selection(hematology::BLEEDING_SURGICAL), SURGICAL);
        let total = cutaneous + mucosal + surgical;
        let threshold = abnormal_threshold(snapshot);

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .component("cutaneous", cutaneous as f64)
            .component("mucosal", mucosal as f64)
            .component("surgical", surgical as f64)
            .component("threshold", threshold as f64);

        let builder = if total >= threshold {
            builder
                .tier(RiskTier::High)
                .interpretation(format!(
                    "Bleeding score {total} (abnormal at {threshold}): abnormal bleeding tendency"
                ))
                .recommend("Coagulation screen, von Willebrand panel and platelet function tests")
                .recommend("Hematology referral")
        } else if total > 0 {
            builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!(
                    "Bleeding score {total} (abnormal at {threshold}): below the abnormal threshold"
                ))
                .recommend("Basic coagulation screen if symptoms persist")
        } else {
            builder
                .tier(RiskTier::Low)
                .interpretation("Bleeding score 0: no bleeding symptoms reported")
        };
        builder.build()
    }
}
