use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, hematology, labs, neuro, patient, rheum, vitals};
use clinexam_core::models::score::RiskTier;
use clinexam_core::{Category, Leaf};
use clinexam_scales::error::ScaleError;
use clinexam_scales::scales::{fibromyalgia, isth_bat, meld_na, sledai_2k};
use clinexam_scales::{all_scales, compute, compute_scores, get_scale};

fn snapshot(entries: &[(&str, Leaf)]) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for (path, leaf) in entries {
        snapshot.set(path, leaf.clone()).unwrap();
    }
    snapshot
}

#[test]
fn registry_ids_are_unique_and_resolvable() {
    let scales = all_scales();
    let mut ids: Vec<&str> = scales.iter().map(|s| s.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), scales.len());
    for id in ids {
        assert_eq!(get_scale(id).unwrap().id(), id);
    }
}

#[test]
fn unknown_scale_fails_loudly() {
    let err = compute("rome_iv", &Snapshot::new()).unwrap_err();
    assert!(matches!(err, ScaleError::UnknownScale(ref id) if id == "rome_iv"));
}

#[test]
fn empty_snapshot_is_not_yet_computable_everywhere() {
    for result in compute_scores(&Snapshot::new()) {
        assert_eq!(result.value, None, "{} should not compute", result.scale_id);
        assert!(result.interpretation.starts_with("Insufficient data"));
        assert_eq!(result.risk_tier, RiskTier::Low);
    }
}

#[test]
fn child_pugh_class_b() {
    let s = snapshot(&[
        (labs::BILIRUBIN, 2.5.into()),
        (labs::ALBUMIN, 3.0.into()),
        (labs::INR, 1.5.into()),
        (gastro::ASCITES_GRADE, 1.0.into()),
        (gastro::ENCEPHALOPATHY_GRADE, 0.0.into()),
    ]);
    let result = compute("child_pugh", &s).unwrap();
    // 2 + 2 + 1 + 2 + 1
    assert_eq!(result.value, Some(8.0));
    assert!(result.interpretation.contains("class B"));
    assert_eq!(result.risk_tier, RiskTier::Intermediate);
}

#[test]
fn child_pugh_worst_case_is_class_c_fifteen() {
    let s = snapshot(&[
        (labs::BILIRUBIN, 6.0.into()),
        (labs::ALBUMIN, 2.1.into()),
        (labs::INR, 2.9.into()),
        (gastro::ASCITES_GRADE, 3.0.into()),
        (gastro::ENCEPHALOPATHY_GRADE, 7.0.into()),
    ]);
    let result = compute("child_pugh", &s).unwrap();
    assert_eq!(result.value, Some(15.0));
    assert_eq!(result.risk_tier, RiskTier::High);
}

#[test]
fn meld_na_reference_case() {
    // bili 2, INR 1.5, creat 1.2, Na 130
    let s = snapshot(&[
        (labs::BILIRUBIN, 2.0.into()),
        (labs::INR, 1.5.into()),
        (labs::CREATININE, 1.2.into()),
        (labs::SODIUM, 130.0.into()),
    ]);
    let result = compute("meld_na", &s).unwrap();
    let meld = 3.78 * 2f64.ln() + 11.2 * 1.5f64.ln() + 9.57 * 1.2f64.ln() + 6.43;
    let expected = (meld + 1.32 * 7.0 - 0.033 * meld * 7.0).round();
    assert_eq!(result.value, Some(expected));
    assert_eq!(result.component("sodium"), Some(130.0));
}

#[test]
fn meld_na_survives_zero_and_negative_labs() {
    let s = snapshot(&[
        (labs::BILIRUBIN, (-3.0).into()),
        (labs::INR, 0.2.into()),
        (labs::SODIUM, 160.0.into()),
    ]);
    let result = compute("meld_na", &s).unwrap();
    assert_eq!(result.value, Some(6.0));
}

#[test]
fn meld_dialysis_floor_applies_before_sodium() {
    assert_eq!(meld_na::meld(1.0, 1.0, 1.0, true), 40.0);
    assert_eq!(meld_na::meld_na(40.0, 125.0), 40.0);
}

#[test]
fn glasgow_blatchford_sums_independent_tables() {
    let s = snapshot(&[
        (labs::UREA, 9.0.into()),
        (labs::HEMOGLOBIN, 11.0.into()),
        (vitals::SYSTOLIC_BP, 95.0.into()),
        (vitals::HEART_RATE, 110.0.into()),
        (gastro::MELENA, true.into()),
        (gastro::SYNCOPE, true.into()),
    ]);
    // urea 3 + Hb (male) 3 + SBP 2 + HR 1 + melena 1 + syncope 2
    let result = compute("glasgow_blatchford", &s).unwrap();
    assert_eq!(result.value, Some(12.0));
    assert_eq!(result.risk_tier, RiskTier::Critical);
}

#[test]
fn glasgow_blatchford_uses_female_hemoglobin_table() {
    let sex = Category::new(["male", "female"]).select("female");
    let s = snapshot(&[(labs::HEMOGLOBIN, 11.0.into()), (patient::SEX, sex.into())]);
    assert_eq!(compute("glasgow_blatchford", &s).unwrap().value, Some(1.0));
}

#[test]
fn bisap_counts_sirs_as_one_point() {
    let s = snapshot(&[
        (labs::BUN, 30.0.into()),
        (vitals::TEMPERATURE, 38.6.into()),
        (vitals::HEART_RATE, 104.0.into()),
        (patient::AGE, 72.0.into()),
    ]);
    let result = compute("bisap", &s).unwrap();
    assert_eq!(result.value, Some(3.0));
    assert_eq!(result.component("sirs"), Some(1.0));
    assert_eq!(result.risk_tier, RiskTier::High);
}

#[test]
fn isth_mucosal_takes_the_maximum_not_the_sum() {
    let s = snapshot(&[(
        hematology::BLEEDING_MUCOSAL,
        vec!["epistaxis", "gi_bleeding"].into(),
    )]);
    let result = compute("isth_bat", &s).unwrap();
    assert_eq!(result.component("mucosal"), Some(4.0));
    assert_eq!(result.value, Some(4.0));
}

#[test]
fn isth_total_is_sum_of_category_maxima() {
    let s = snapshot(&[
        (hematology::BLEEDING_CUTANEOUS, vec!["bruising", "hematoma"].into()),
        (hematology::BLEEDING_MUCOSAL, vec!["epistaxis"].into()),
        (hematology::BLEEDING_SURGICAL, vec!["tooth_extraction", "postpartum"].into()),
    ]);
    assert_eq!(compute("isth_bat", &s).unwrap().value, Some(7.0));
    assert_eq!(
        isth_bat::category_score(&["menorrhagia".to_string(), "unknown".to_string()], isth_bat::MUCOSAL),
        3
    );
}

#[test]
fn qsofa_two_points_is_high_risk() {
    let s = snapshot(&[
        (vitals::SYSTOLIC_BP, 98.0.into()),
        (vitals::RESPIRATORY_RATE, 24.0.into()),
    ]);
    let result = compute("qsofa", &s).unwrap();
    assert_eq!(result.value, Some(2.0));
    assert_eq!(result.component("high_risk"), Some(1.0));
}

#[test]
fn qsofa_reads_glasgow_from_components() {
    let s = snapshot(&[(neuro::GCS_VERBAL, 4.0.into())]);
    assert_eq!(compute("qsofa", &s).unwrap().value, Some(1.0));
    assert_eq!(compute("gcs", &s).unwrap().value, Some(14.0));
}

#[test]
fn nihss_clamps_items_and_checks_window() {
    let s = snapshot(&[
        (neuro::nihss::MOTOR_ARM, 9.0.into()),
        (neuro::nihss::LANGUAGE, 2.0.into()),
        (neuro::ONSET_HOURS, 2.0.into()),
    ]);
    let result = compute("nihss", &s).unwrap();
    assert_eq!(result.value, Some(6.0));
    assert_eq!(result.component("within_window"), Some(1.0));
    assert_eq!(result.component("thrombolysis_eligible"), Some(1.0));

    let late = s.with(neuro::ONSET_HOURS, 6.0).unwrap();
    let result = compute("nihss", &late).unwrap();
    assert_eq!(result.component("thrombolysis_eligible"), Some(0.0));
}

#[test]
fn nihss_hemorrhage_blocks_thrombolysis() {
    let s = snapshot(&[
        (neuro::nihss::MOTOR_LEG, 4.0.into()),
        (neuro::ONSET_HOURS, 1.0.into()),
        (neuro::INTRACRANIAL_HEMORRHAGE, true.into()),
    ]);
    let result = compute("nihss", &s).unwrap();
    assert_eq!(result.component("thrombolysis_eligible"), Some(0.0));
}

#[test]
fn das28_crp_formula() {
    let s = snapshot(&[
        (rheum::TENDER_JOINTS, 9.0.into()),
        (rheum::SWOLLEN_JOINTS, 4.0.into()),
        (labs::CRP, 19.0.into()),
        (rheum::PATIENT_GLOBAL, 50.0.into()),
    ]);
    let expected = 0.56 * 3.0 + 0.28 * 2.0 + 0.36 * 20f64.ln() + 0.014 * 50.0 + 0.96;
    let result = compute("das28_crp", &s).unwrap();
    assert_eq!(result.value, Some((expected * 100.0).round() / 100.0));
    assert_eq!(result.risk_tier, RiskTier::Intermediate);
}

#[test]
fn sledai_weights() {
    let s = snapshot(&[
        (sledai_2k::descriptor_path("seizure").as_str(), true.into()),
        (sledai_2k::descriptor_path("arthritis").as_str(), true.into()),
        (sledai_2k::descriptor_path("rash").as_str(), true.into()),
        (sledai_2k::descriptor_path("fever").as_str(), true.into()),
    ]);
    let result = compute("sledai_2k", &s).unwrap();
    assert_eq!(result.value, Some(15.0));
    assert_eq!(result.component("neuro_vascular"), Some(8.0));
    assert_eq!(result.risk_tier, RiskTier::High);
}

#[test]
fn fibromyalgia_criteria_boundaries() {
    assert!(fibromyalgia::criteria_met(7, 5));
    assert!(fibromyalgia::criteria_met(3, 9));
    assert!(!fibromyalgia::criteria_met(2, 9));
    assert!(!fibromyalgia::criteria_met(6, 8));
}

#[test]
fn fibromyalgia_symptom_severity_bands_somatic_count() {
    let mut s = Snapshot::new();
    for region in &fibromyalgia::REGIONS[..7] {
        s.set(&fibromyalgia::region_path(region), true).unwrap();
    }
    s.set(rheum::FIBRO_FATIGUE, 2.0).unwrap();
    s.set(rheum::FIBRO_COGNITIVE, 1.0).unwrap();
    s.set(rheum::FIBRO_SOMATIC_COUNT, 5.0).unwrap();

    let result = compute("fibromyalgia", &s).unwrap();
    assert_eq!(result.component("wpi"), Some(7.0));
    assert_eq!(result.component("ss"), Some(5.0));
    assert_eq!(result.component("criteria_met"), Some(1.0));
}

#[test]
fn wells_alternative_diagnosis_subtracts_two() {
    let s = snapshot(&[
        (hematology::wells::CALF_SWELLING, true.into()),
        (hematology::wells::ALTERNATIVE_LIKELY, true.into()),
    ]);
    let result = compute("wells_dvt", &s).unwrap();
    assert_eq!(result.value, Some(-1.0));
    assert_eq!(result.risk_tier, RiskTier::Low);
}
