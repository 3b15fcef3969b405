//! Alert rule engine.
//!
//! An ordered table of independent rules. Each rule reads the snapshot and
//! the computed scores and either fires one alert or stays silent. Fired
//! alerts are stable-sorted by priority, so ties keep table order.

use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, infect, labs, neuro, patient, rheum, vitals};
use clinexam_core::models::alert::{Alert, AlertSeverity, TriageLevel};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult, find_score, score_value};
use clinexam_scales::scales::{nihss, sledai_2k};

use crate::findings::{fever, hypotension};

type Check = fn(&Snapshot, &[ScoreResult]) -> Option<String>;

pub struct AlertRule {
    pub id: &'static str,
    pub domain: Domain,
    pub severity: AlertSeverity,
    pub priority: u8,
    pub action: Option<&'static str>,
    check: Check,
}

impl AlertRule {
    fn new(
        id: &'static str,
        domain: Domain,
        severity: AlertSeverity,
        action: Option<&'static str>,
        check: Check,
    ) -> Self {
        let priority = match severity {
            AlertSeverity::Critical => 1,
            AlertSeverity::Urgent => 2,
            AlertSeverity::Warning => 3,
            AlertSeverity::Info => 4,
        };
        Self {
            id,
            domain,
            severity,
            priority,
            action,
            check,
        }
    }

    pub fn evaluate(&self, snapshot: &Snapshot, scores: &[ScoreResult]) -> Option<Alert> {
        (self.check)(snapshot, scores).map(|message| Alert {
            id: self.id.to_string(),
            severity: self.severity,
            message,
            action: self.action.map(str::to_string),
            priority: self.priority,
        })
    }
}

fn score_at_least(scores: &[ScoreResult], scale_id: &str, threshold: f64) -> Option<f64> {
    score_value(scores, scale_id).filter(|v| *v >= threshold)
}

static RULES: LazyLock<Vec<AlertRule>> = LazyLock::new(|| {
    use AlertSeverity::{Critical, Info, Urgent, Warning};
    use Domain::{Gastroenterology, Hematology, Infectiology, Neurology, Rheumatology};

    vec![
        AlertRule::new(
            "cholangitis_shock",
            Gastroenterology,
            Critical,
            Some("Fluid resuscitation, blood cultures, broad-spectrum antibiotics and urgent biliary drainage (ERCP)"),
            |s, _| {
                let sbp = hypotension(s).filter(|_| s.flag(gastro::CHARCOT_TRIAD))?;
                Some(format!(
                    "Charcot triad with systolic BP {sbp} mmHg: suspected acute cholangitis with septic shock"
                ))
            },
        ),
        AlertRule::new(
            "cholangitis",
            Gastroenterology,
            Urgent,
            Some("Blood cultures, IV antibiotics and biliary imaging; plan drainage within 24-48 hours"),
            |s, _| {
                (s.flag(gastro::CHARCOT_TRIAD) && hypotension(s).is_none())
                    .then(|| "Charcot triad present: suspected acute cholangitis".to_string())
            },
        ),
        AlertRule::new(
            "hypotension",
            Infectiology,
            Critical,
            Some("Two large-bore IV lines, fluid bolus, and identify the source of shock"),
            |s, _| {
                let sbp = hypotension(s).filter(|_| !s.flag(gastro::CHARCOT_TRIAD))?;
                Some(format!("Systolic BP {sbp} mmHg: hemodynamic instability"))
            },
        ),
        AlertRule::new(
            "sepsis_qsofa",
            Infectiology,
            Critical,
            Some("Sepsis bundle: lactate, blood cultures and antibiotics within one hour"),
            |_, scores| {
                let qsofa = score_at_least(scores, "qsofa", 2.0)?;
                Some(format!("qSOFA {qsofa}: high risk of sepsis-related mortality"))
            },
        ),
        AlertRule::new(
            "hypoxemia",
            Infectiology,
            Critical,
            Some("Supplemental oxygen to target SpO2 94-98% and arterial blood gas"),
            |s, _| {
                let spo2 = s.measured(vitals::SPO2).filter(|v| *v < 90.0)?;
                Some(format!("SpO2 {spo2}%: hypoxemia"))
            },
        ),
        AlertRule::new(
            "peritonitis",
            Gastroenterology,
            Critical,
            Some("Nil by mouth, IV access, analgesia and immediate surgical review"),
            |s, _| {
                let defense = if s.flag(gastro::RIGIDITY) {
                    "rigidity"
                } else if s.flag(gastro::GUARDING) {
                    "guarding"
                } else {
                    return None;
                };
                s.flag(gastro::REBOUND).then(|| {
                    format!("Rebound tenderness with abdominal {defense}: peritonitis / acute abdomen")
                })
            },
        ),
        AlertRule::new(
            "stroke_code",
            Neurology,
            Critical,
            Some("Activate stroke code: CT/CTA now and evaluate for thrombolysis"),
            |s, scores| {
                let total = score_at_least(scores, "nihss", 1.0)?;
                nihss::within_window(s).then(|| {
                    format!(
                        "NIHSS {total} within {} hours of onset: acute stroke in the treatment window",
                        nihss::THROMBOLYSIS_WINDOW_HOURS
                    )
                })
            },
        ),
        AlertRule::new(
            "thunderclap_headache",
            Neurology,
            Critical,
            Some("Non-contrast CT head immediately; lumbar puncture if CT is negative"),
            |s, _| {
                s.flag(neuro::THUNDERCLAP_HEADACHE)
                    .then(|| "Thunderclap headache: exclude subarachnoid hemorrhage".to_string())
            },
        ),
        AlertRule::new(
            "meningism",
            Infectiology,
            Critical,
            Some("Blood cultures and empirical IV antibiotics without waiting for lumbar puncture"),
            |s, _| {
                (s.flag(infect::NECK_STIFFNESS) && fever(s) && s.flag(neuro::ALTERED_MENTAL_STATUS))
                    .then(|| {
                        "Fever, neck stiffness and altered mental status: suspected bacterial meningitis"
                            .to_string()
                    })
            },
        ),
        AlertRule::new(
            "neutropenic_fever",
            Hematology,
            Critical,
            Some("Broad-spectrum IV antibiotics within one hour"),
            |s, _| {
                let anc = s.measured(labs::ANC).filter(|v| *v < 500.0)?;
                fever(s).then(|| format!("Fever with ANC {anc}/uL: febrile neutropenia"))
            },
        ),
        AlertRule::new(
            "giant_cell_arteritis",
            Rheumatology,
            Critical,
            Some("Start high-dose glucocorticoids today; ESR/CRP and temporal artery imaging or biopsy"),
            |s, _| {
                let older = s.measured(patient::AGE).is_some_and(|a| a > 50.0);
                let ischemic = s.flag(rheum::JAW_CLAUDICATION) || s.flag(rheum::VISUAL_LOSS);
                (older && s.flag(neuro::NEW_HEADACHE) && ischemic).then(|| {
                    "New headache over 50 with jaw claudication or visual symptoms: giant cell arteritis"
                        .to_string()
                })
            },
        ),
        AlertRule::new(
            "upper_gi_bleed",
            Gastroenterology,
            Urgent,
            Some("Endoscopy within 24 hours; group and cross-match"),
            |_, scores| {
                let gbs = score_value(scores, "glasgow_blatchford").filter(|v| *v > 6.0)?;
                Some(format!("Glasgow-Blatchford {gbs}: high-risk upper GI bleeding"))
            },
        ),
        AlertRule::new(
            "severe_pancreatitis",
            Gastroenterology,
            Urgent,
            Some("Goal-directed fluids and high-dependency monitoring"),
            |_, scores| {
                let bisap = score_at_least(scores, "bisap", 3.0)?;
                Some(format!("BISAP {bisap}: predicted severe acute pancreatitis"))
            },
        ),
        AlertRule::new(
            "decompensated_liver",
            Gastroenterology,
            Urgent,
            Some("Hepatology review today"),
            |_, scores| {
                let child_pugh = score_at_least(scores, "child_pugh", 10.0)?;
                Some(format!("Child-Pugh {child_pugh} (class C): decompensated liver disease"))
            },
        ),
        AlertRule::new(
            "meld_transplant",
            Gastroenterology,
            Urgent,
            Some("Urgent transplant center referral"),
            |_, scores| {
                let meld = score_at_least(scores, "meld_na", 30.0)?;
                Some(format!("MELD-Na {meld}: high short-term mortality"))
            },
        ),
        AlertRule::new(
            "severe_pneumonia",
            Infectiology,
            Urgent,
            Some("Admit and assess for ICU care"),
            |_, scores| {
                let curb = score_at_least(scores, "curb65", 3.0)?;
                Some(format!("CURB-65 {curb}: severe community-acquired pneumonia"))
            },
        ),
        AlertRule::new(
            "stroke_outside_window",
            Neurology,
            Urgent,
            Some("Urgent imaging and thrombectomy assessment"),
            |s, scores| {
                let total = score_at_least(scores, "nihss", 1.0)?;
                (!nihss::within_window(s)).then(|| {
                    format!("NIHSS {total}: neurological deficit outside the thrombolysis window")
                })
            },
        ),
        AlertRule::new(
            "severe_anemia",
            Hematology,
            Urgent,
            Some("Crossmatch and consider transfusion"),
            |s, _| {
                let hb = s.measured(labs::HEMOGLOBIN).filter(|v| *v < 7.0)?;
                Some(format!("Hemoglobin {hb} g/dL: below transfusion threshold"))
            },
        ),
        AlertRule::new(
            "neuropsychiatric_lupus",
            Rheumatology,
            Urgent,
            Some("Urgent neurology and rheumatology review; MRI brain"),
            |s, _| {
                let seizure = s.flag(&sledai_2k::descriptor_path("seizure"));
                let psychosis = s.flag(&sledai_2k::descriptor_path("psychosis"));
                (seizure || psychosis)
                    .then(|| "Seizure or psychosis in lupus: neuropsychiatric involvement".to_string())
            },
        ),
        AlertRule::new(
            "septic_arthritis",
            Rheumatology,
            Urgent,
            Some("Joint aspiration before antibiotics; orthopedic review"),
            |s, _| {
                (s.flag(rheum::HOT_SWOLLEN_JOINT) && fever(s))
                    .then(|| "Hot swollen joint with fever: exclude septic arthritis".to_string())
            },
        ),
        AlertRule::new(
            "borderline_spo2",
            Infectiology,
            Warning,
            Some("Repeat oximetry and monitor respiratory rate"),
            |s, _| {
                let spo2 = s
                    .measured(vitals::SPO2)
                    .filter(|v| (90.0..94.0).contains(v))?;
                Some(format!("SpO2 {spo2}%: borderline oxygenation"))
            },
        ),
        AlertRule::new(
            "abnormal_bleeding_score",
            Hematology,
            Warning,
            Some("Coagulation work-up before invasive procedures"),
            |_, scores| {
                let isth = find_score(scores, "isth_bat").filter(|s| s.risk_tier == RiskTier::High)?;
                Some(format!("{}: abnormal bleeding tendency", isth.interpretation))
            },
        ),
        AlertRule::new(
            "dvt_likely",
            Hematology,
            Warning,
            Some("Compression ultrasound"),
            |_, scores| {
                let wells = score_at_least(scores, "wells_dvt", 3.0)?;
                Some(format!("Wells {wells}: deep vein thrombosis likely"))
            },
        ),
        AlertRule::new(
            "lupus_activity",
            Rheumatology,
            Warning,
            None,
            |_, scores| {
                let sledai = score_at_least(scores, "sledai_2k", 11.0)?;
                Some(format!("SLEDAI-2K {sledai}: high lupus activity"))
            },
        ),
        AlertRule::new(
            "rheumatoid_activity",
            Rheumatology,
            Warning,
            None,
            |_, scores| {
                let das = score_value(scores, "das28_crp").filter(|v| *v > 5.1)?;
                Some(format!("DAS28-CRP {das}: high rheumatoid disease activity"))
            },
        ),
        AlertRule::new(
            "fibromyalgia_criteria",
            Rheumatology,
            Info,
            None,
            |_, scores| {
                find_score(scores, "fibromyalgia")
                    .and_then(|s| s.component("criteria_met"))
                    .filter(|met| *met >= 1.0)
                    .map(|_| "ACR 2010 fibromyalgia criteria met".to_string())
            },
        ),
    ]
});

/// The rule table, in definition order.
pub fn rules() -> &'static [AlertRule] {
    &RULES
}

/// Evaluate every rule and return fired alerts sorted by priority.
pub fn evaluate_alerts(snapshot: &Snapshot, scores: &[ScoreResult]) -> Vec<Alert> {
    evaluate_alerts_for(snapshot, scores, &Domain::ALL)
}

/// Evaluate only the rules belonging to `domains`.
pub fn evaluate_alerts_for(
    snapshot: &Snapshot,
    scores: &[ScoreResult],
    domains: &[Domain],
) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = RULES
        .iter()
        .filter(|rule| domains.contains(&rule.domain))
        .filter_map(|rule| rule.evaluate(snapshot, scores))
        .collect();
    // Vec::sort_by_key is stable
    alerts.sort_by_key(|a| a.priority);
    alerts
}

pub fn derive_triage_level(alerts: &[Alert]) -> TriageLevel {
    TriageLevel::from_alerts(alerts)
}
