use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, infect, labs, neuro, vitals};
use clinexam_core::models::alert::{AlertSeverity, TriageLevel};
use clinexam_engine::{compute_progress, derive_triage_level, evaluate_alerts, recompute};
use clinexam_scales::{compute, compute_scores};
use proptest::prelude::*;

fn vitals_snapshot(
    sbp: f64,
    rr: f64,
    hr: f64,
    temperature: f64,
    spo2: f64,
    verbal: f64,
    flags: [bool; 4],
) -> Snapshot {
    let mut s = Snapshot::new();
    s.set(vitals::SYSTOLIC_BP, sbp).unwrap();
    s.set(vitals::RESPIRATORY_RATE, rr).unwrap();
    s.set(vitals::HEART_RATE, hr).unwrap();
    s.set(vitals::TEMPERATURE, temperature).unwrap();
    s.set(vitals::SPO2, spo2).unwrap();
    s.set(neuro::GCS_VERBAL, verbal).unwrap();
    s.set(gastro::CHARCOT_TRIAD, flags[0]).unwrap();
    s.set(gastro::MELENA, flags[1]).unwrap();
    s.set(infect::SUSPECTED_INFECTION, flags[2]).unwrap();
    s.set(gastro::RIGIDITY, flags[3]).unwrap();
    s
}

prop_compose! {
    fn arb_snapshot()(
        sbp in 0.0..220.0f64,
        rr in 0.0..45.0f64,
        hr in 0.0..180.0f64,
        temperature in 0.0..42.0f64,
        spo2 in 0.0..100.0f64,
        verbal in 0.0..5.0f64,
        flags in any::<[bool; 4]>(),
        hemoglobin in 0.0..18.0f64,
    ) -> Snapshot {
        let mut s = vitals_snapshot(sbp, rr, hr, temperature, spo2, verbal, flags);
        s.set(labs::HEMOGLOBIN, hemoglobin).unwrap();
        s
    }
}

proptest! {
    #[test]
    fn alerts_sorted_ascending_by_priority(s in arb_snapshot()) {
        let alerts = evaluate_alerts(&s, &compute_scores(&s));
        prop_assert!(alerts.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn evaluate_alerts_is_idempotent(s in arb_snapshot()) {
        let scores = compute_scores(&s);
        prop_assert_eq!(evaluate_alerts(&s, &scores), evaluate_alerts(&s, &scores));
    }

    #[test]
    fn qsofa_of_two_always_alerts(s in arb_snapshot()) {
        let scores = compute_scores(&s);
        let qsofa = compute("qsofa", &s).unwrap().value.unwrap_or(0.0);
        let alerts = evaluate_alerts(&s, &scores);
        if qsofa >= 2.0 {
            let alerted = alerts.iter().any(|a| {
                a.id == "sepsis_qsofa"
                    && matches!(a.severity, AlertSeverity::Critical | AlertSeverity::Urgent)
            });
            prop_assert!(alerted, "qSOFA {} raised no sepsis alert", qsofa);
            prop_assert_ne!(derive_triage_level(&alerts), TriageLevel::Stable);
        }
    }

    #[test]
    fn triage_is_critical_exactly_when_a_critical_alert_fired(s in arb_snapshot()) {
        let result = recompute(&s);
        let any_critical = result.alerts.iter().any(|a| a.severity == AlertSeverity::Critical);
        prop_assert_eq!(result.triage == TriageLevel::Critical, any_critical);
    }

    #[test]
    fn progress_is_a_percentage(s in arb_snapshot()) {
        prop_assert!(compute_progress(&s) <= 100);
    }

    #[test]
    fn protocol_list_shape_is_fixed(s in arb_snapshot()) {
        let result = recompute(&s);
        prop_assert_eq!(result.protocols.len(), 5);
        for p in &result.protocols {
            if !p.active {
                prop_assert!(p.severity_label.is_empty());
                prop_assert!(p.actions.is_empty());
            }
        }
    }
}
