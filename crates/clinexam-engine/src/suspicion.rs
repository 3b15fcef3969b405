//! Diagnostic suspicion decision lists.
//!
//! Each family is an ordered list of guarded rules. The first rule whose
//! guard holds produces the family's suspicion and nothing after it is
//! looked at. Red-flag patterns sit above the generic ones they overlap.

use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, hematology, infect, labs, neuro, patient, rheum};
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreResult, find_score, score_value};
use clinexam_core::models::suspicion::{DiagnosticSuspicion, Likelihood};
use clinexam_scales::scales::{nihss, sirs};

use crate::findings::{above, below, fever, hypotension, lactate_above, ruq_pain};

pub struct SuspicionContext<'a> {
    pub snapshot: &'a Snapshot,
    pub scores: &'a [ScoreResult],
}

impl SuspicionContext<'_> {
    fn score(&self, scale_id: &str) -> Option<f64> {
        score_value(self.scores, scale_id)
    }

    fn score_at_least(&self, scale_id: &str, threshold: f64) -> bool {
        self.score(scale_id).is_some_and(|v| v >= threshold)
    }
}

/// Returns the supporting findings when the guard holds.
type Guard = fn(&SuspicionContext<'_>) -> Option<Vec<String>>;

pub struct SuspicionRule {
    pub syndrome: &'static str,
    pub likelihood: Likelihood,
    pub recommendation: &'static str,
    guard: Guard,
}

pub struct SuspicionFamily {
    pub name: &'static str,
    pub domain: Domain,
    rules: Vec<SuspicionRule>,
}

impl SuspicionFamily {
    pub fn rule_tags(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.syndrome).collect()
    }

    pub fn evaluate(&self, ctx: &SuspicionContext<'_>) -> Option<DiagnosticSuspicion> {
        self.rules.iter().find_map(|rule| {
            (rule.guard)(ctx).map(|supporting_findings| DiagnosticSuspicion {
                family: self.name.to_string(),
                syndrome: rule.syndrome.to_string(),
                likelihood: rule.likelihood,
                supporting_findings,
                recommendation: rule.recommendation.to_string(),
            })
        })
    }
}

/// Labels of the findings that are present, in the order given.
fn present(findings: &[(bool, &str)]) -> Vec<String> {
    findings
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, label)| label.to_string())
        .collect()
}

fn biliary_triad(s: &Snapshot) -> bool {
    s.flag(gastro::CHARCOT_TRIAD) || (fever(s) && s.flag(gastro::JAUNDICE) && ruq_pain(s))
}

fn triad_findings(s: &Snapshot) -> Vec<(bool, &'static str)> {
    vec![
        (s.flag(gastro::CHARCOT_TRIAD), "Charcot triad"),
        (fever(s), "fever"),
        (s.flag(gastro::JAUNDICE), "jaundice"),
        (ruq_pain(s), "right upper quadrant pain"),
    ]
}

fn infection_context(s: &Snapshot) -> bool {
    s.flag(infect::SUSPECTED_INFECTION) || fever(s)
}

static FAMILIES: LazyLock<Vec<SuspicionFamily>> = LazyLock::new(|| {
    vec![
        SuspicionFamily {
            name: "hepatobiliary",
            domain: Domain::Gastroenterology,
            rules: vec![
                SuspicionRule {
                    syndrome: "suppurative_cholangitis",
                    likelihood: Likelihood::High,
                    recommendation: "Reynolds pentad: resuscitate and arrange emergency biliary drainage",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let shock = hypotension(s).is_some();
                        let confused = s.flag(neuro::ALTERED_MENTAL_STATUS);
                        (biliary_triad(s) && (shock || confused)).then(|| {
                            let mut findings = triad_findings(s);
                            findings.push((shock, "hypotension"));
                            findings.push((confused, "altered mental status"));
                            present(&findings)
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "acute_cholangitis",
                    likelihood: Likelihood::High,
                    recommendation: "Blood cultures, IV antibiotics and biliary imaging",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        biliary_triad(s).then(|| present(&triad_findings(s)))
                    },
                },
                SuspicionRule {
                    syndrome: "acute_cholecystitis",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Right upper quadrant ultrasound and surgical review",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let leukocytosis = above(s, labs::WBC, 11.0);
                        (s.flag(gastro::MURPHY_SIGN) && (fever(s) || leukocytosis)).then(|| {
                            present(&[
                                (true, "positive Murphy sign"),
                                (fever(s), "fever"),
                                (leukocytosis, "leukocytosis"),
                                (ruq_pain(s), "right upper quadrant pain"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "biliary_colic",
                    likelihood: Likelihood::Low,
                    recommendation: "Elective ultrasound; return if fever or jaundice develop",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        (ruq_pain(s) && !fever(s))
                            .then(|| vec!["right upper quadrant pain without fever".to_string()])
                    },
                },
            ],
        },
        SuspicionFamily {
            name: "liver",
            domain: Domain::Gastroenterology,
            rules: vec![
                SuspicionRule {
                    syndrome: "decompensated_cirrhosis",
                    likelihood: Likelihood::High,
                    recommendation: "Admit; diagnostic paracentesis and hepatology referral",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let class_c = ctx.score_at_least("child_pugh", 10.0);
                        let ascites = s.measured(gastro::ASCITES_GRADE).is_some_and(|g| g >= 1.0);
                        let encephalopathy =
                            s.measured(gastro::ENCEPHALOPATHY_GRADE).is_some_and(|g| g >= 1.0);
                        let liver = s.flag(gastro::HEPATIC_DISEASE) || s.flag(gastro::JAUNDICE);
                        (class_c || (liver && (ascites || encephalopathy))).then(|| {
                            present(&[
                                (class_c, "Child-Pugh class C"),
                                (s.flag(gastro::HEPATIC_DISEASE), "known liver disease"),
                                (s.flag(gastro::JAUNDICE), "jaundice"),
                                (ascites, "ascites"),
                                (encephalopathy, "hepatic encephalopathy"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "compensated_cirrhosis",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Outpatient hepatology follow-up and variceal screening",
                    guard: |ctx| {
                        let child_pugh = ctx.score("child_pugh")?;
                        ctx.snapshot.flag(gastro::HEPATIC_DISEASE).then(|| {
                            vec![
                                "known liver disease".to_string(),
                                format!("Child-Pugh {child_pugh}"),
                            ]
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "liver_injury",
                    likelihood: Likelihood::Low,
                    recommendation: "Repeat liver panel and hepatitis serology",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let bilirubin = above(s, labs::BILIRUBIN, 2.5);
                        let inr = above(s, labs::INR, 1.5);
                        (bilirubin || inr).then(|| {
                            present(&[(bilirubin, "raised bilirubin"), (inr, "prolonged INR")])
                        })
                    },
                },
            ],
        },
        SuspicionFamily {
            name: "neurology",
            domain: Domain::Neurology,
            rules: vec![
                SuspicionRule {
                    syndrome: "subarachnoid_hemorrhage",
                    likelihood: Likelihood::High,
                    recommendation: "Non-contrast CT head now; lumbar puncture if CT is negative",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        s.flag(neuro::THUNDERCLAP_HEADACHE).then(|| {
                            present(&[
                                (true, "thunderclap headache"),
                                (s.flag(infect::NECK_STIFFNESS), "neck stiffness"),
                                (s.flag(neuro::ANTICOAGULATED), "anticoagulation"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "bacterial_meningitis",
                    likelihood: Likelihood::High,
                    recommendation: "Empirical IV antibiotics and dexamethasone; blood cultures",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        (s.flag(infect::NECK_STIFFNESS) && fever(s)).then(|| {
                            present(&[
                                (true, "neck stiffness"),
                                (true, "fever"),
                                (s.flag(neuro::ALTERED_MENTAL_STATUS), "altered mental status"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "acute_ischemic_stroke",
                    likelihood: Likelihood::High,
                    recommendation: "CT/CTA and thrombolysis assessment",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let deficit = nihss::total(s) > 0 || s.flag(neuro::FOCAL_DEFICIT);
                        let excluded =
                            s.flag(neuro::INTRACRANIAL_HEMORRHAGE) || s.flag(neuro::SYMPTOMS_RESOLVED);
                        (deficit && !excluded).then(|| {
                            present(&[
                                (s.flag(neuro::FOCAL_DEFICIT), "focal neurological deficit"),
                                (nihss::total(s) > 0, "positive NIHSS"),
                                (nihss::within_window(s), "within the thrombolysis window"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "transient_ischemic_attack",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Urgent TIA clinic, antiplatelet therapy and carotid imaging",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        (s.flag(neuro::FOCAL_DEFICIT) && s.flag(neuro::SYMPTOMS_RESOLVED))
                            .then(|| vec!["focal deficit that has resolved".to_string()])
                    },
                },
            ],
        },
        SuspicionFamily {
            name: "hematology",
            domain: Domain::Hematology,
            rules: vec![
                SuspicionRule {
                    syndrome: "acute_leukemia",
                    likelihood: Likelihood::High,
                    recommendation: "Peripheral smear and urgent hematology referral",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let blasts = s.flag(hematology::BLASTS);
                        let cytopenias =
                            below(s, labs::PLATELETS, 100.0) && below(s, labs::HEMOGLOBIN, 10.0);
                        let organs =
                            s.flag(hematology::SPLENOMEGALY) || s.flag(hematology::LYMPHADENOPATHY);
                        (blasts || (cytopenias && organs)).then(|| {
                            present(&[
                                (blasts, "circulating blasts"),
                                (cytopenias, "anemia with thrombocytopenia"),
                                (s.flag(hematology::SPLENOMEGALY), "splenomegaly"),
                                (s.flag(hematology::LYMPHADENOPATHY), "lymphadenopathy"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "immune_thrombocytopenia",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Repeat count on citrate, smear review and HIV/HCV serology",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let bleeding = s.flag(hematology::PETECHIAE)
                            || !s.selection(hematology::BLEEDING_CUTANEOUS).is_empty();
                        let isolated = !below(s, labs::HEMOGLOBIN, 10.0)
                            && !s.flag(hematology::SPLENOMEGALY);
                        (below(s, labs::PLATELETS, 100.0) && bleeding && isolated).then(|| {
                            present(&[
                                (true, "thrombocytopenia"),
                                (s.flag(hematology::PETECHIAE), "petechiae"),
                                (
                                    !s.selection(hematology::BLEEDING_CUTANEOUS).is_empty(),
                                    "cutaneous bleeding",
                                ),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "deep_vein_thrombosis",
                    likelihood: Likelihood::Moderate,
                    recommendation: "D-dimer and compression ultrasound",
                    guard: |ctx| {
                        let wells = ctx.score("wells_dvt").filter(|w| *w >= 2.0)?;
                        Some(vec![format!("Wells score {wells}")])
                    },
                },
                SuspicionRule {
                    syndrome: "inherited_bleeding_disorder",
                    likelihood: Likelihood::Low,
                    recommendation: "Von Willebrand panel and factor assays",
                    guard: |ctx| {
                        let isth = find_score(ctx.scores, "isth_bat")
                            .filter(|r| r.risk_tier == RiskTier::High)?;
                        (!below(ctx.snapshot, labs::PLATELETS, 100.0))
                            .then(|| vec![format!("abnormal bleeding score {}", isth.value.unwrap_or(0.0))])
                    },
                },
            ],
        },
        SuspicionFamily {
            name: "infection",
            domain: Domain::Infectiology,
            rules: vec![
                SuspicionRule {
                    syndrome: "septic_shock",
                    likelihood: Likelihood::High,
                    recommendation: "Sepsis bundle now, vasopressors and ICU referral",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let pressors = s.flag(infect::VASOPRESSORS);
                        let hypoperfusion = (hypotension(s).is_some() && lactate_above(s, 2.0))
                            || lactate_above(s, 4.0);
                        (infection_context(s) && (pressors || hypoperfusion)).then(|| {
                            present(&[
                                (pressors, "vasopressor requirement"),
                                (hypotension(s).is_some(), "hypotension"),
                                (lactate_above(s, 2.0), "raised lactate"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "sepsis",
                    likelihood: Likelihood::High,
                    recommendation: "Cultures and antibiotics within one hour",
                    guard: |ctx| {
                        let qsofa = ctx.score("qsofa").filter(|q| *q >= 2.0)?;
                        infection_context(ctx.snapshot).then(|| {
                            vec!["suspected infection".to_string(), format!("qSOFA {qsofa}")]
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "severe_pneumonia",
                    likelihood: Likelihood::High,
                    recommendation: "Chest radiograph and admission for IV antibiotics",
                    guard: |ctx| {
                        let curb = ctx.score("curb65").filter(|c| *c >= 3.0)?;
                        ctx.snapshot.flag(infect::PRODUCTIVE_COUGH).then(|| {
                            vec!["productive cough".to_string(), format!("CURB-65 {curb}")]
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "infection_with_sirs",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Look for the source and reassess qSOFA",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        (infection_context(s) && sirs::criteria_met(s)).then(|| {
                            sirs::criteria(s).into_iter().map(str::to_string).collect()
                        })
                    },
                },
            ],
        },
        SuspicionFamily {
            name: "rheumatology",
            domain: Domain::Rheumatology,
            rules: vec![
                SuspicionRule {
                    syndrome: "giant_cell_arteritis",
                    likelihood: Likelihood::High,
                    recommendation: "High-dose glucocorticoids and temporal artery assessment",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        let older = s.measured(patient::AGE).is_some_and(|a| a > 50.0);
                        let cranial = s.flag(rheum::JAW_CLAUDICATION)
                            || s.flag(rheum::VISUAL_LOSS)
                            || s.flag(rheum::TEMPORAL_TENDERNESS);
                        (older && cranial).then(|| {
                            present(&[
                                (true, "age over 50"),
                                (s.flag(neuro::NEW_HEADACHE), "new headache"),
                                (s.flag(rheum::JAW_CLAUDICATION), "jaw claudication"),
                                (s.flag(rheum::VISUAL_LOSS), "visual loss"),
                                (s.flag(rheum::TEMPORAL_TENDERNESS), "temporal artery tenderness"),
                            ])
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "septic_arthritis",
                    likelihood: Likelihood::High,
                    recommendation: "Joint aspiration before antibiotics",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        (s.flag(rheum::HOT_SWOLLEN_JOINT) && fever(s))
                            .then(|| present(&[(true, "hot swollen joint"), (true, "fever")]))
                    },
                },
                SuspicionRule {
                    syndrome: "lupus_flare",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Complement, anti-dsDNA and urinalysis; rheumatology review",
                    guard: |ctx| {
                        let sledai = ctx.score("sledai_2k").filter(|v| *v >= 6.0)?;
                        Some(vec![format!("SLEDAI-2K {sledai}")])
                    },
                },
                SuspicionRule {
                    syndrome: "active_rheumatoid_arthritis",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Escalate disease-modifying therapy",
                    guard: |ctx| {
                        let das = ctx.score("das28_crp").filter(|v| *v > 3.2)?;
                        above(ctx.snapshot, rheum::SWOLLEN_JOINTS, 0.0).then(|| {
                            vec![format!("DAS28-CRP {das}"), "swollen joints".to_string()]
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "fibromyalgia",
                    likelihood: Likelihood::Moderate,
                    recommendation: "Exclude inflammatory disease; graded exercise and education",
                    guard: |ctx| {
                        let result = find_score(ctx.scores, "fibromyalgia")?;
                        (result.component("criteria_met") == Some(1.0)).then(|| {
                            vec![
                                format!("WPI {}", result.component("wpi").unwrap_or(0.0)),
                                format!("SS {}", result.component("ss").unwrap_or(0.0)),
                            ]
                        })
                    },
                },
                SuspicionRule {
                    syndrome: "inflammatory_arthritis",
                    likelihood: Likelihood::Low,
                    recommendation: "Rheumatoid factor, anti-CCP and joint imaging",
                    guard: |ctx| {
                        let s = ctx.snapshot;
                        (above(s, rheum::SWOLLEN_JOINTS, 0.0) && above(s, labs::CRP, 10.0))
                            .then(|| present(&[(true, "swollen joints"), (true, "raised CRP")]))
                    },
                },
            ],
        },
    ]
});

pub fn families() -> &'static [SuspicionFamily] {
    &FAMILIES
}

/// At most one suspicion per family, in family order.
pub fn diagnostic_suspicions(snapshot: &Snapshot, scores: &[ScoreResult]) -> Vec<DiagnosticSuspicion> {
    diagnostic_suspicions_for(snapshot, scores, &Domain::ALL)
}

/// Only families belonging to `domains` run. `scores` should be the
/// unfiltered set so score-guarded rules never fall through.
pub fn diagnostic_suspicions_for(
    snapshot: &Snapshot,
    scores: &[ScoreResult],
    domains: &[Domain],
) -> Vec<DiagnosticSuspicion> {
    let ctx = SuspicionContext { snapshot, scores };
    FAMILIES
        .iter()
        .filter(|f| domains.contains(&f.domain))
        .filter_map(|f| f.evaluate(&ctx))
        .collect()
}
