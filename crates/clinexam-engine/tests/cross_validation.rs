use clinexam_core::fields::{gastro, hematology, infect, labs, neuro, patient, rheum, vitals};
use clinexam_core::models::cross_validation::{CorrelationStatus, CrossValidation};
use clinexam_core::models::suspicion::Likelihood;
use clinexam_core::{Category, Leaf, Snapshot};
use clinexam_engine::cross_validate;
use clinexam_engine::cross_validation::rules;
use clinexam_engine::suspicion::families;
use clinexam_scales::compute_scores;

fn snapshot(entries: &[(&str, Leaf)]) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for (path, leaf) in entries {
        snapshot.set(path, leaf.clone()).unwrap();
    }
    snapshot
}

fn validate(snapshot: &Snapshot) -> CrossValidation {
    cross_validate(snapshot, &compute_scores(snapshot))
}

fn side(label: &str) -> Leaf {
    Category::new(["left", "right"]).select(label).into()
}

fn suspicion_for<'a>(result: &'a CrossValidation, family: &str) -> Option<&'a str> {
    result
        .suspicions
        .iter()
        .find(|s| s.family == family)
        .map(|s| s.syndrome.as_str())
}

#[test]
fn correlation_checks_run_in_fixed_order() {
    let ids: Vec<&str> = rules().iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        [
            "murphy_ruq",
            "jaundice_bilirubin",
            "fever_temperature",
            "melena_bun",
            "petechiae_platelets",
            "facial_limb_side",
            "sledai_arthritis_joints",
            "mcburney_location",
        ]
    );
}

#[test]
fn suspicion_families_and_rules_are_pinned() {
    let tags: Vec<(&str, Vec<&str>)> = families()
        .iter()
        .map(|f| (f.name, f.rule_tags()))
        .collect();
    assert_eq!(
        tags,
        vec![
            (
                "hepatobiliary",
                vec![
                    "suppurative_cholangitis",
                    "acute_cholangitis",
                    "acute_cholecystitis",
                    "biliary_colic"
                ]
            ),
            (
                "liver",
                vec!["decompensated_cirrhosis", "compensated_cirrhosis", "liver_injury"]
            ),
            (
                "neurology",
                vec![
                    "subarachnoid_hemorrhage",
                    "bacterial_meningitis",
                    "acute_ischemic_stroke",
                    "transient_ischemic_attack"
                ]
            ),
            (
                "hematology",
                vec![
                    "acute_leukemia",
                    "immune_thrombocytopenia",
                    "deep_vein_thrombosis",
                    "inherited_bleeding_disorder"
                ]
            ),
            (
                "infection",
                vec!["septic_shock", "sepsis", "severe_pneumonia", "infection_with_sirs"]
            ),
            (
                "rheumatology",
                vec![
                    "giant_cell_arteritis",
                    "septic_arthritis",
                    "lupus_flare",
                    "active_rheumatoid_arthritis",
                    "fibromyalgia",
                    "inflammatory_arthritis"
                ]
            ),
        ]
    );
}

#[test]
fn empty_snapshot_has_nothing_to_correlate() {
    assert_eq!(validate(&Snapshot::new()), CrossValidation::default());
}

#[test]
fn murphy_sign_without_ruq_pain_is_inconsistent() {
    let s = snapshot(&[(gastro::MURPHY_SIGN, true.into())]);
    let result = validate(&s);
    assert!(result.correlations.is_empty());
    assert_eq!(result.inconsistencies.len(), 1);
    assert_eq!(result.inconsistencies[0].id, "murphy_ruq");
    assert_eq!(result.inconsistencies[0].status, CorrelationStatus::Inconsistent);

    let s = s.with(gastro::RUQ_PAIN, true).unwrap();
    let result = validate(&s);
    assert!(result.inconsistencies.is_empty());
    assert_eq!(result.correlations[0].id, "murphy_ruq");
}

#[test]
fn jaundice_against_bilirubin() {
    let low = snapshot(&[(gastro::JAUNDICE, true.into()), (labs::BILIRUBIN, 1.2.into())]);
    assert_eq!(validate(&low).inconsistencies[0].id, "jaundice_bilirubin");

    let high = low.with(labs::BILIRUBIN, 4.0).unwrap();
    assert_eq!(validate(&high).correlations[0].id, "jaundice_bilirubin");

    let unseen = snapshot(&[(labs::BILIRUBIN, 4.0.into())]);
    let result = validate(&unseen);
    assert_eq!(result.inconsistencies.len(), 1);
    assert!(result.inconsistencies[0].explanation.contains("sclerae"));
}

#[test]
fn reported_fever_needs_a_measured_temperature() {
    let s = snapshot(&[(infect::REPORTED_FEVER, true.into())]);
    assert!(validate(&s).inconsistencies.is_empty());

    let afebrile = s.with(vitals::TEMPERATURE, 36.8).unwrap();
    assert_eq!(validate(&afebrile).inconsistencies[0].id, "fever_temperature");

    let febrile = s.with(vitals::TEMPERATURE, 37.6).unwrap();
    assert_eq!(validate(&febrile).correlations[0].id, "fever_temperature");
}

#[test]
fn crossed_facial_and_limb_weakness_is_flagged() {
    let s = snapshot(&[
        (neuro::FACIAL_PALSY_SIDE, side("left")),
        (neuro::LIMB_WEAKNESS_SIDE, side("right")),
    ]);
    let result = validate(&s);
    assert_eq!(result.inconsistencies[0].id, "facial_limb_side");
    assert!(result.inconsistencies[0].explanation.contains("brainstem"));
}

#[test]
fn mcburney_tenderness_fits_right_lower_quadrant() {
    let location = Category::new(["ruq", "rlq", "luq", "llq", "periumbilical"]).select("rlq");
    let s = snapshot(&[
        (gastro::MCBURNEY, true.into()),
        (gastro::PAIN_LOCATION, location.into()),
    ]);
    let result = validate(&s);
    assert_eq!(result.correlations.len(), 1);
    assert_eq!(result.correlations[0].id, "mcburney_location");
}

#[test]
fn consistent_and_inconsistent_checks_are_split() {
    let s = snapshot(&[
        (gastro::MELENA, true.into()),
        (labs::BUN, 40.0.into()),
        (hematology::PETECHIAE, true.into()),
        (labs::PLATELETS, 250.0.into()),
    ]);
    let result = validate(&s);
    assert_eq!(result.correlations.len(), 1);
    assert_eq!(result.correlations[0].id, "melena_bun");
    assert_eq!(result.inconsistencies.len(), 1);
    assert_eq!(result.inconsistencies[0].id, "petechiae_platelets");
}

#[test]
fn reynolds_pentad_wins_over_plain_cholangitis() {
    let s = snapshot(&[
        (gastro::CHARCOT_TRIAD, true.into()),
        (vitals::SYSTOLIC_BP, 85.0.into()),
    ]);
    let result = validate(&s);
    let hepatobiliary: Vec<_> = result
        .suspicions
        .iter()
        .filter(|s| s.family == "hepatobiliary")
        .collect();
    assert_eq!(hepatobiliary.len(), 1);
    assert_eq!(hepatobiliary[0].syndrome, "suppurative_cholangitis");
    assert_eq!(hepatobiliary[0].likelihood, Likelihood::High);
    assert!(hepatobiliary[0].supporting_findings.contains(&"hypotension".to_string()));
}

#[test]
fn red_flag_rheumatology_pattern_precedes_generic_ones() {
    let s = snapshot(&[
        (patient::AGE, 72.0.into()),
        (rheum::JAW_CLAUDICATION, true.into()),
        (rheum::HOT_SWOLLEN_JOINT, true.into()),
        (vitals::TEMPERATURE, 38.5.into()),
        (rheum::SWOLLEN_JOINTS, 3.0.into()),
        (labs::CRP, 40.0.into()),
    ]);
    assert_eq!(
        suspicion_for(&validate(&s), "rheumatology"),
        Some("giant_cell_arteritis")
    );

    let younger = s.with(patient::AGE, 35.0).unwrap();
    assert_eq!(
        suspicion_for(&validate(&younger), "rheumatology"),
        Some("septic_arthritis")
    );

    let afebrile = snapshot(&[(rheum::SWOLLEN_JOINTS, 3.0.into()), (labs::CRP, 20.0.into())]);
    assert_eq!(
        suspicion_for(&validate(&afebrile), "rheumatology"),
        Some("inflammatory_arthritis")
    );
}

#[test]
fn thunderclap_headache_precedes_meningitis() {
    let s = snapshot(&[
        (neuro::THUNDERCLAP_HEADACHE, true.into()),
        (infect::NECK_STIFFNESS, true.into()),
        (vitals::TEMPERATURE, 38.4.into()),
    ]);
    assert_eq!(
        suspicion_for(&validate(&s), "neurology"),
        Some("subarachnoid_hemorrhage")
    );

    let without = s.with(neuro::THUNDERCLAP_HEADACHE, false).unwrap();
    assert_eq!(
        suspicion_for(&validate(&without), "neurology"),
        Some("bacterial_meningitis")
    );
}

#[test]
fn resolved_deficit_is_a_tia() {
    let s = snapshot(&[
        (neuro::FOCAL_DEFICIT, true.into()),
        (neuro::SYMPTOMS_RESOLVED, true.into()),
    ]);
    assert_eq!(
        suspicion_for(&validate(&s), "neurology"),
        Some("transient_ischemic_attack")
    );
}

#[test]
fn families_emit_independently() {
    let s = snapshot(&[
        (gastro::CHARCOT_TRIAD, true.into()),
        (infect::SUSPECTED_INFECTION, true.into()),
        (vitals::TEMPERATURE, 39.0.into()),
        (vitals::HEART_RATE, 112.0.into()),
    ]);
    let result = validate(&s);
    assert_eq!(suspicion_for(&result, "hepatobiliary"), Some("acute_cholangitis"));
    assert_eq!(suspicion_for(&result, "infection"), Some("infection_with_sirs"));
}
