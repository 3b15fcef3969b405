//! Anatomical and clinical correlation checks.
//!
//! A check only applies when the findings it correlates have been recorded.
//! Applicable checks land in `correlations` when the findings agree and in
//! `inconsistencies` when they contradict each other.

use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, hematology, infect, labs, neuro, rheum, vitals};
use clinexam_core::models::cross_validation::{CorrelationCheck, CorrelationStatus, CrossValidation};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::ScoreResult;
use clinexam_scales::scales::sledai_2k;

use crate::findings::ruq_pain;
use crate::suspicion::diagnostic_suspicions_for;

pub const JAUNDICE_BILIRUBIN: f64 = 2.5;
pub const SUBCLINICAL_BILIRUBIN: f64 = 3.0;
pub const FEBRILE_TEMPERATURE: f64 = 37.5;
pub const UPPER_GI_BUN: f64 = 25.0;
pub const PETECHIAE_PLATELETS: f64 = 100.0;

type Check = fn(&Snapshot) -> Option<CorrelationCheck>;

pub struct CorrelationRule {
    pub id: &'static str,
    check: Check,
}

fn outcome(
    id: &str,
    findings: &[&str],
    consistent: bool,
    agree: impl Into<String>,
    disagree: impl Into<String>,
) -> CorrelationCheck {
    let (status, explanation) = if consistent {
        (CorrelationStatus::Consistent, agree.into())
    } else {
        (CorrelationStatus::Inconsistent, disagree.into())
    };
    CorrelationCheck {
        id: id.to_string(),
        findings: findings.iter().map(|f| f.to_string()).collect(),
        status,
        explanation,
    }
}

static RULES: LazyLock<Vec<CorrelationRule>> = LazyLock::new(|| {
    vec![
        CorrelationRule {
            id: "murphy_ruq",
            check: |s| {
                s.flag(gastro::MURPHY_SIGN).then(|| {
                    outcome(
                        "murphy_ruq",
                        &["Murphy sign", "right upper quadrant pain"],
                        ruq_pain(s),
                        "Murphy sign with right upper quadrant pain localizes to the gallbladder",
                        "Murphy sign recorded without right upper quadrant pain",
                    )
                })
            },
        },
        CorrelationRule {
            id: "jaundice_bilirubin",
            check: |s| {
                let bilirubin = s.measured(labs::BILIRUBIN)?;
                if s.flag(gastro::JAUNDICE) {
                    return Some(outcome(
                        "jaundice_bilirubin",
                        &["clinical jaundice", "serum bilirubin"],
                        bilirubin >= JAUNDICE_BILIRUBIN,
                        format!("Jaundice matches bilirubin {bilirubin} mg/dL"),
                        format!(
                            "Jaundice recorded but bilirubin {bilirubin} mg/dL is below {JAUNDICE_BILIRUBIN}: check for carotenemia or recheck the sample"
                        ),
                    ));
                }
                (bilirubin >= SUBCLINICAL_BILIRUBIN).then(|| {
                    outcome(
                        "jaundice_bilirubin",
                        &["serum bilirubin", "no jaundice recorded"],
                        false,
                        "",
                        format!("Bilirubin {bilirubin} mg/dL should be clinically visible: re-examine sclerae"),
                    )
                })
            },
        },
        CorrelationRule {
            id: "fever_temperature",
            check: |s| {
                let temperature = s.measured(vitals::TEMPERATURE)?;
                s.flag(infect::REPORTED_FEVER).then(|| {
                    outcome(
                        "fever_temperature",
                        &["reported fever", "measured temperature"],
                        temperature >= FEBRILE_TEMPERATURE,
                        format!("Reported fever confirmed at {temperature} °C"),
                        format!("Reported fever but measured {temperature} °C: consider antipyretic use"),
                    )
                })
            },
        },
        CorrelationRule {
            id: "melena_bun",
            check: |s| {
                let bun = s.measured(labs::BUN)?;
                s.flag(gastro::MELENA).then(|| {
                    outcome(
                        "melena_bun",
                        &["melena", "blood urea nitrogen"],
                        bun > UPPER_GI_BUN,
                        format!("Melena with BUN {bun} mg/dL supports an upper GI source"),
                        format!("Melena with BUN {bun} mg/dL: consider a small-bowel or right colonic source"),
                    )
                })
            },
        },
        CorrelationRule {
            id: "petechiae_platelets",
            check: |s| {
                let platelets = s.measured(labs::PLATELETS)?;
                s.flag(hematology::PETECHIAE).then(|| {
                    outcome(
                        "petechiae_platelets",
                        &["petechiae", "platelet count"],
                        platelets < PETECHIAE_PLATELETS,
                        format!("Petechiae explained by platelets {platelets} ×10⁹/L"),
                        format!(
                            "Petechiae with platelets {platelets} ×10⁹/L: consider vasculitis or platelet dysfunction"
                        ),
                    )
                })
            },
        },
        CorrelationRule {
            id: "facial_limb_side",
            check: |s| {
                let face = s.category(neuro::FACIAL_PALSY_SIDE)?;
                let limb = s.category(neuro::LIMB_WEAKNESS_SIDE)?;
                Some(outcome(
                    "facial_limb_side",
                    &["facial palsy side", "limb weakness side"],
                    face == limb,
                    format!("Facial and limb weakness both {face}: single hemispheric lesion"),
                    format!("Facial palsy {face} but limb weakness {limb}: crossed signs suggest a brainstem lesion"),
                ))
            },
        },
        CorrelationRule {
            id: "sledai_arthritis_joints",
            check: |s| {
                s.flag(&sledai_2k::descriptor_path("arthritis")).then(|| {
                    let swollen = s.number(rheum::SWOLLEN_JOINTS).unwrap_or(0.0);
                    outcome(
                        "sledai_arthritis_joints",
                        &["SLEDAI arthritis", "swollen joint count"],
                        swollen >= 2.0,
                        format!("SLEDAI arthritis matches {swollen} swollen joints"),
                        format!("SLEDAI arthritis needs at least 2 swollen joints, {swollen} recorded"),
                    )
                })
            },
        },
        CorrelationRule {
            id: "mcburney_location",
            check: |s| {
                let location = s.category(gastro::PAIN_LOCATION)?;
                s.flag(gastro::MCBURNEY).then(|| {
                    outcome(
                        "mcburney_location",
                        &["McBurney tenderness", "pain location"],
                        matches!(location, "rlq" | "periumbilical"),
                        format!("McBurney tenderness with {location} pain fits appendicitis"),
                        format!("McBurney tenderness but pain located {location}"),
                    )
                })
            },
        },
    ]
});

pub fn rules() -> &'static [CorrelationRule] {
    &RULES
}

pub fn correlation_checks(snapshot: &Snapshot) -> Vec<CorrelationCheck> {
    RULES.iter().filter_map(|rule| (rule.check)(snapshot)).collect()
}

pub fn cross_validate(snapshot: &Snapshot, scores: &[ScoreResult]) -> CrossValidation {
    cross_validate_for(snapshot, scores, &Domain::ALL)
}

/// Correlation checks always run; suspicion families are limited to
/// `domains`.
pub fn cross_validate_for(snapshot: &Snapshot, scores: &[ScoreResult], domains: &[Domain]) -> CrossValidation {
    let (correlations, inconsistencies) = correlation_checks(snapshot)
        .into_iter()
        .partition(|c| c.status == CorrelationStatus::Consistent);
    CrossValidation {
        correlations,
        inconsistencies,
        suspicions: diagnostic_suspicions_for(snapshot, scores, domains),
    }
}
