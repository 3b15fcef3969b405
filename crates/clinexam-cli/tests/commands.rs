use clinexam_cli::commands::{complete, list_scales, read_snapshot, recompute, score, set_leaf};
use clinexam_core::fields::{gastro, hematology, vitals};
use clinexam_core::models::alert::TriageLevel;
use clinexam_core::models::domain::Domain;
use clinexam_engine::Engine;

#[test]
fn scales_filter_by_domain() {
    let all = list_scales(None);
    assert_eq!(all.len(), clinexam_scales::all_scales().len());

    let neuro = list_scales(Some(Domain::Neurology));
    assert!(!neuro.is_empty());
    assert!(neuro.iter().all(|s| s.domain == Domain::Neurology));
    assert!(neuro.iter().any(|s| s.id == "nihss"));
}

#[test]
fn set_builds_a_snapshot_file_leaf_by_leaf() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("exam.json");

    set_leaf(&file, gastro::CHARCOT_TRIAD, "true").unwrap();
    set_leaf(&file, vitals::SYSTOLIC_BP, "85").unwrap();
    set_leaf(&file, hematology::BLEEDING_MUCOSAL, r#"["epistaxis"]"#).unwrap();

    let snapshot = read_snapshot(&file).unwrap();
    assert!(snapshot.flag(gastro::CHARCOT_TRIAD));
    assert_eq!(snapshot.number(vitals::SYSTOLIC_BP), Some(85.0));
    assert_eq!(snapshot.selection(hematology::BLEEDING_MUCOSAL), ["epistaxis"]);
    assert!(!dir.path().join("exam.json.tmp").exists());

    let result = recompute(&Engine::default(), &file).unwrap();
    assert_eq!(result.triage, TriageLevel::Critical);
    assert_eq!(result.alerts[0].id, "cholangitis_shock");
}

#[test]
fn set_rejects_invalid_json_and_conflicting_paths() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("exam.json");

    assert!(set_leaf(&file, "vitals.spo2", "not json").is_err());

    set_leaf(&file, "vitals", "true").unwrap();
    assert!(set_leaf(&file, "vitals.spo2", "95").is_err());
}

#[test]
fn score_reports_unknown_scales() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("exam.json");
    std::fs::write(&file, "{}").unwrap();

    assert!(score("rome_iv", &file).is_err());
    let result = score("qsofa", &file).unwrap();
    assert_eq!(result.value, None);
}

#[test]
fn empty_file_is_an_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("exam.json");
    std::fs::write(&file, "").unwrap();

    let payload = complete(&Engine::default(), &file).unwrap();
    assert!(payload.snapshot.is_empty());
    assert_eq!(payload.results.progress, 0);
}
