use clinexam_core::fields::{gastro, labs, neuro, vitals};
use clinexam_core::models::alert::TriageLevel;
use clinexam_core::models::recomputation::Recomputation;
use clinexam_core::models::suspicion::Likelihood;
use clinexam_core::models::domain::Domain;
use clinexam_core::{BoundedNumber, Category, Snapshot};
use clinexam_engine::{Engine, EngineConfig, compute_progress, recompute};
use clinexam_scales::all_scales;

fn charcot_in_shock() -> Snapshot {
    let mut s = Snapshot::new();
    s.set(gastro::CHARCOT_TRIAD, true).unwrap();
    s.set(vitals::SYSTOLIC_BP, 85.0).unwrap();
    s
}

#[test]
fn empty_snapshot() {
    let result = recompute(&Snapshot::new());
    assert_eq!(result.progress, 0);
    assert!(result.alerts.is_empty());
    assert_eq!(result.triage, TriageLevel::Stable);
    assert_eq!(result.scores.len(), all_scales().len());
    assert!(result.scores.iter().all(|s| !s.is_computable()));
    assert!(result.protocols.iter().all(|p| !p.active));
    assert!(result.cross_validation.suspicions.is_empty());
}

#[test]
fn charcot_triad_in_shock_end_to_end() {
    let result = recompute(&charcot_in_shock());

    assert_eq!(result.alerts.len(), 1);
    assert_eq!(result.alerts[0].id, "cholangitis_shock");
    assert_eq!(result.triage, TriageLevel::Critical);

    let active: Vec<&str> = result
        .protocols
        .iter()
        .filter(|p| p.active)
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(active, ["cholangitis"]);

    assert_eq!(result.progress, 100);
    assert_eq!(
        result.cross_validation.suspicions[0].syndrome,
        "suppurative_cholangitis"
    );
}

#[test]
fn recompute_is_deterministic() {
    let s = charcot_in_shock();
    assert_eq!(recompute(&s), recompute(&s));
}

#[test]
fn domain_selection_limits_scores_and_alerts() {
    let engine = Engine::new(EngineConfig::for_domains([Domain::Rheumatology]));
    let result = engine.recompute(&charcot_in_shock());

    assert!(result.alerts.is_empty());
    assert!(result.scores.iter().all(|s| s.domain == Domain::Rheumatology));
    assert_eq!(result.protocols.len(), 5);
    assert!(result.protocols.iter().all(|p| !p.active));
    assert!(result.cross_validation.suspicions.is_empty());
}

fn stroke_in_window() -> Snapshot {
    let mut s = Snapshot::new();
    s.set(neuro::nihss::MOTOR_ARM, 4.0).unwrap();
    s.set(neuro::nihss::MOTOR_LEG, 3.0).unwrap();
    s.set(neuro::ONSET_HOURS, 1.0).unwrap();
    s
}

fn stroke_label(result: &Recomputation) -> Option<&str> {
    result
        .protocols
        .iter()
        .find(|p| p.name == "stroke" && p.active)
        .map(|p| p.severity_label.as_str())
}

#[test]
fn domain_selection_does_not_downgrade_stroke_branch() {
    let s = stroke_in_window();
    let full = recompute(&s);
    assert_eq!(stroke_label(&full), Some("Thrombolysis candidate"));

    let neurology = Engine::new(EngineConfig::for_domains([Domain::Neurology])).recompute(&s);
    assert_eq!(stroke_label(&neurology), Some("Thrombolysis candidate"));
    assert_eq!(neurology.protocols, full.protocols);

    // a protocol outside the selection is hidden, never re-branched
    let rheumatology = Engine::new(EngineConfig::for_domains([Domain::Rheumatology])).recompute(&s);
    assert_eq!(stroke_label(&rheumatology), None);
    assert!(rheumatology.protocols.iter().any(|p| p.name == "stroke" && !p.active));
}

fn liver_suspicion(result: &Recomputation) -> Option<(&str, Likelihood)> {
    result
        .cross_validation
        .suspicions
        .iter()
        .find(|s| s.family == "liver")
        .map(|s| (s.syndrome.as_str(), s.likelihood))
}

#[test]
fn domain_selection_does_not_downgrade_liver_suspicion() {
    let mut s = Snapshot::new();
    s.set(gastro::HEPATIC_DISEASE, true).unwrap();
    s.set(labs::BILIRUBIN, 3.0).unwrap();

    let full = recompute(&s);
    assert_eq!(
        liver_suspicion(&full),
        Some(("compensated_cirrhosis", Likelihood::Moderate))
    );

    let gastro_only = Engine::new(EngineConfig::for_domains([Domain::Gastroenterology])).recompute(&s);
    assert_eq!(liver_suspicion(&gastro_only), liver_suspicion(&full));

    let rheumatology = Engine::new(EngineConfig::for_domains([Domain::Rheumatology])).recompute(&s);
    assert_eq!(liver_suspicion(&rheumatology), None);
    assert!(rheumatology.scores.iter().all(|s| s.scale_id != "child_pugh"));
}

#[test]
fn engine_config_deduplicates_domains() {
    let config = EngineConfig::for_domains([Domain::Neurology, Domain::Hematology, Domain::Neurology]);
    assert_eq!(config.domains, [Domain::Hematology, Domain::Neurology]);
    assert!(config.includes(Domain::Neurology));
    assert!(!config.includes(Domain::Rheumatology));
    assert_eq!(EngineConfig::default().domains, Domain::ALL);
}

#[test]
fn progress_counts_answered_leaves() {
    let mut s = Snapshot::new();
    s.set("a.flag", true).unwrap();
    s.set("a.other_flag", false).unwrap();
    s.set("b.note", "   ").unwrap();
    s.set("b.deep.count", 3.0).unwrap();
    assert_eq!(compute_progress(&s), 50);

    s.set("c.picks", Vec::<String>::new()).unwrap();
    // 2 of 5
    assert_eq!(compute_progress(&s), 40);
}

#[test]
fn progress_rounds_to_nearest() {
    let mut s = Snapshot::new();
    s.set("x", true).unwrap();
    s.set("y", false).unwrap();
    s.set("z", false).unwrap();
    assert_eq!(compute_progress(&s), 33);

    s.set("y", 1.0).unwrap();
    assert_eq!(compute_progress(&s), 67);
}

#[test]
fn progress_treats_zero_and_unselected_categories_as_unanswered() {
    let mut s = Snapshot::new();
    s.set(
        "pain",
        BoundedNumber {
            value: 0.0,
            min: 0.0,
            max: 10.0,
        },
    )
    .unwrap();
    s.set("side", Category::new(["left", "right"])).unwrap();
    assert_eq!(compute_progress(&s), 0);

    s.set("side", Category::new(["left", "right"]).select("left")).unwrap();
    assert_eq!(compute_progress(&s), 50);
}

#[test]
fn completion_payload_carries_snapshot_and_results() {
    let s = charcot_in_shock();
    let result = recompute(&s);
    let first = result.clone().complete(s.clone());
    let second = result.clone().complete(s.clone());

    assert_ne!(first.session_id, second.session_id);
    assert_eq!(first.snapshot, s);
    assert_eq!(first.results, result);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["results"]["triage"], "critical");
    assert_eq!(json["snapshot"]["gastro"]["biliary"]["charcot_triad"], true);
}
