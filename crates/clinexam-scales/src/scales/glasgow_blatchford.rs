use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, labs, patient, vitals};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult};

use crate::Scale;
use crate::scoring::{ScoreBuilder, paths};

/// Glasgow-Blatchford bleeding score for upper GI hemorrhage.
/// Independent point tables, summed with no interaction terms. Range 0–23.
pub struct GlasgowBlatchford;

static INPUTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    paths(&[
        labs::UREA,
        labs::HEMOGLOBIN,
        vitals::SYSTOLIC_BP,
        vitals::HEART_RATE,
        gastro::MELENA,
        gastro::SYNCOPE,
        gastro::HEPATIC_DISEASE,
        gastro::HEART_FAILURE,
    ])
});

/// Urea in mmol/L.
pub fn urea_points(urea: Option<f64>) -> u32 {
    match urea {
        Some(u) if u > 25.0 => 6,
        Some(u) if u >= 10.0 => 4,
        Some(u) if u >= 8.0 => 3,
        Some(u) if u >= 6.5 => 2,
        _ => 0,
    }
}

/// Hemoglobin in g/dL; thresholds differ by sex.
pub fn hemoglobin_points(hemoglobin: Option<f64>, female: bool) -> u32 {
    let Some(hb) = hemoglobin else {
        return 0;
    };
    if female {
        if hb >= 12.0 {
            0
        } else if hb >= 10.0 {
            1
        } else {
            6
        }
    } else if hb >= 13.0 {
        0
    } else if hb >= 12.0 {
        1
    } else if hb >= 10.0 {
        3
    } else {
        6
    }
}

pub fn systolic_points(systolic: Option<f64>) -> u32 {
    match systolic {
        Some(s) if s < 90.0 => 3,
        Some(s) if s < 100.0 => 2,
        Some(s) if s < 110.0 => 1,
        _ => 0,
    }
}

impl Scale for GlasgowBlatchford {
    fn id(&self) -> &str {
        "glasgow_blatchford"
    }

    fn name(&self) -> &str {
        "Glasgow-Blatchford"
    }

    fn domain(&self) -> Domain {
        Domain::Gastroenterology
    }

    fn inputs(&self) -> &[String] {
        &INPUTS
    }

    fn score(&self, snapshot: &Snapshot) -> ScoreResult {
        let female = snapshot.category(patient::SEX) == Some("female");

        let urea = urea_points(snapshot.measured(labs::UREA));
        let hemoglobin = hemoglobin_points(snapshot.measured(labs::HEMOGLOBIN), female);
        let systolic = systolic_points(snapshot.measured(vitals::SYSTOLIC_BP));
        let pulse = u32::from(snapshot.measured(vitals::HEART_RATE).is_some_and(|hr| hr >= 100.0));
        let melena = u32::from(snapshot.flag(gastro::MELENA));
        let syncope = 2 * u32::from(snapshot.flag(gastro::SYNCOPE));
        let hepatic = 2 * u32::from(snapshot.flag(gastro::HEPATIC_DISEASE));
        let cardiac = 2 * u32::from(snapshot.flag(gastro::HEART_FAILURE));

        let total = urea + hemoglobin + systolic + pulse + melena + syncope + hepatic + cardiac;

        let builder = ScoreBuilder::new(self.id(), self.name(), self.domain(), total as f64)
            .component("urea", urea as f64)
            .component("hemoglobin", hemoglobin as f64)
            .component("systolic_bp", systolic as f64)
            .component("heart_rate", pulse as f64);

        let builder = match total {
            0 => builder
                .tier(RiskTier::Low)
                .interpretation("Glasgow-Blatchford 0: very low risk of needing intervention")
                .recommend("Consider early discharge with outpatient endoscopy"),
            1..=6 => builder
                .tier(RiskTier::Intermediate)
                .interpretation(format!(
                    "Glasgow-Blatchford {total}: intervention possible"
                ))
                .recommend("Admit for observation and inpatient endoscopy"),
            7..=11 => builder
                .tier(RiskTier::High)
                .interpretation(format!(
                    "Glasgow-Blatchford {total}: high risk of needing transfusion or endoscopic therapy"
                ))
                .recommend("Endoscopy within 24 hours")
                .recommend("Group and cross-match blood"),
            _ => builder
                .tier(RiskTier::Critical)
                .interpretation(format!(
                    "Glasgow-Blatchford {total}: very high risk of intervention or death"
                ))
                .recommend("Resuscitate and arrange urgent endoscopy")
                .recommend("Consider ICU admission"),
        };
        builder.build()
    }
}
