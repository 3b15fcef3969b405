//! Adaptive protocol activator.
//!
//! Each protocol has an activation guard and a severity cascade. The cascade
//! is tested most-severe-first and the first matching branch decides the
//! label, actions and timeline; the final branch always matches.

use std::sync::LazyLock;

use clinexam_core::Snapshot;
use clinexam_core::fields::{gastro, infect, labs, neuro, patient, vitals};
use clinexam_core::models::alert::Alert;
use clinexam_core::models::domain::Domain;
use clinexam_core::models::protocol::Protocol;
use clinexam_scales::scales::{nihss, sirs};

use crate::findings::{above, below, fever, gi_bleeding, hypotension, lactate_above, ruq_pain};

/// What a protocol branch reads: the snapshot and the alerts already fired.
pub struct ProtocolContext<'a> {
    pub snapshot: &'a Snapshot,
    pub alerts: &'a [Alert],
}

impl ProtocolContext<'_> {
    pub fn has_alert(&self, id: &str) -> bool {
        self.alerts.iter().any(|a| a.id == id)
    }
}

type Guard = fn(&ProtocolContext<'_>) -> bool;

pub struct Branch {
    pub tag: &'static str,
    pub label: &'static str,
    pub actions: &'static [&'static str],
    pub timeline: &'static str,
    applies: Guard,
}

pub struct ProtocolDefinition {
    pub name: &'static str,
    pub domain: Domain,
    activates: Guard,
    cascade: Vec<Branch>,
}

impl ProtocolDefinition {
    pub fn cascade_tags(&self) -> Vec<&'static str> {
        self.cascade.iter().map(|b| b.tag).collect()
    }

    pub fn evaluate(&self, ctx: &ProtocolContext<'_>) -> Protocol {
        if !(self.activates)(ctx) {
            return Protocol::inactive(self.name);
        }
        match self.cascade.iter().find(|branch| (branch.applies)(ctx)) {
            Some(branch) => Protocol {
                name: self.name.to_string(),
                active: true,
                severity_label: branch.label.to_string(),
                actions: branch.actions.iter().map(|a| a.to_string()).collect(),
                timeline: branch.timeline.to_string(),
            },
            None => Protocol::inactive(self.name),
        }
    }
}

fn always(_: &ProtocolContext<'_>) -> bool {
    true
}

static PROTOCOLS: LazyLock<Vec<ProtocolDefinition>> = LazyLock::new(|| {
    vec![
        ProtocolDefinition {
            name: "hemorrhage",
            domain: Domain::Gastroenterology,
            activates: |ctx| gi_bleeding(ctx.snapshot) || ctx.has_alert("upper_gi_bleed"),
            cascade: vec![
                Branch {
                    tag: "massive",
                    label: "Massive hemorrhage",
                    actions: &[
                        "Activate the massive transfusion protocol",
                        "Two large-bore IV cannulas; crossmatch 4-6 units",
                        "Emergency endoscopy once resuscitated",
                        "Interventional radiology or surgery if endoscopic hemostasis fails",
                    ],
                    timeline: "Immediate",
                    applies: |ctx| {
                        hypotension(ctx.snapshot).is_some()
                            || above(ctx.snapshot, vitals::HEART_RATE, 120.0)
                            || below(ctx.snapshot, labs::HEMOGLOBIN, 7.0)
                    },
                },
                Branch {
                    tag: "severe",
                    label: "Severe hemorrhage",
                    actions: &[
                        "Fluid resuscitation; restrictive transfusion to Hb 7-8 g/dL",
                        "IV proton pump inhibitor",
                        "Endoscopy within 24 hours",
                    ],
                    timeline: "Resuscitate within 1 hour; endoscopy within 24 hours",
                    applies: |ctx| {
                        tachycardic(ctx.snapshot)
                            || below(ctx.snapshot, labs::HEMOGLOBIN, 10.0)
                            || ctx.has_alert("upper_gi_bleed")
                    },
                },
                Branch {
                    tag: "moderate",
                    label: "Moderate hemorrhage",
                    actions: &[
                        "IV access; group and save",
                        "Serial hemoglobin every 6 hours",
                        "Inpatient endoscopy",
                    ],
                    timeline: "Within 24 hours",
                    applies: |ctx| ctx.snapshot.flag(gastro::HEMATEMESIS),
                },
                Branch {
                    tag: "mild",
                    label: "Mild hemorrhage",
                    actions: &["Outpatient endoscopy", "Iron studies and stool follow-up"],
                    timeline: "Within 2 weeks",
                    applies: always,
                },
            ],
        },
        ProtocolDefinition {
            name: "acute_abdomen",
            domain: Domain::Gastroenterology,
            activates: |ctx| {
                let s = ctx.snapshot;
                s.flag(gastro::SEVERE_PAIN)
                    || s.flag(gastro::REBOUND)
                    || s.flag(gastro::GUARDING)
                    || s.flag(gastro::RIGIDITY)
                    || ctx.has_alert("peritonitis")
            },
            cascade: vec![
                Branch {
                    tag: "surgical_emergency",
                    label: "Surgical emergency",
                    actions: &[
                        "Nil by mouth; resuscitate",
                        "Emergency surgical review",
                        "Broad-spectrum antibiotics",
                        "CT abdomen if the patient is stable enough",
                    ],
                    timeline: "Immediate",
                    applies: |ctx| {
                        ctx.snapshot.flag(gastro::RIGIDITY)
                            && (hypotension(ctx.snapshot).is_some() || fever(ctx.snapshot))
                    },
                },
                Branch {
                    tag: "peritonitis",
                    label: "Peritonitis",
                    actions: &[
                        "Nil by mouth and IV fluids",
                        "Surgical review",
                        "CT abdomen with contrast",
                    ],
                    timeline: "Within 1 hour",
                    applies: |ctx| {
                        let s = ctx.snapshot;
                        s.flag(gastro::REBOUND) || s.flag(gastro::GUARDING) || s.flag(gastro::RIGIDITY)
                    },
                },
                Branch {
                    tag: "obstruction",
                    label: "Suspected bowel obstruction",
                    actions: &[
                        "Nil by mouth and nasogastric decompression",
                        "Abdominal CT",
                        "Correct electrolytes",
                    ],
                    timeline: "Within 4 hours",
                    applies: |ctx| {
                        let s = ctx.snapshot;
                        s.flag(gastro::DISTENSION)
                            && s.flag(gastro::VOMITING)
                            && s.flag(gastro::ABSENT_BOWEL_SOUNDS)
                    },
                },
                Branch {
                    tag: "mild",
                    label: "Abdominal pain without peritoneal signs",
                    actions: &["Analgesia", "Serial abdominal examination", "Ultrasound as indicated"],
                    timeline: "Reassess within 6 hours",
                    applies: always,
                },
            ],
        },
        ProtocolDefinition {
            name: "cholangitis",
            domain: Domain::Gastroenterology,
            activates: |ctx| {
                let s = ctx.snapshot;
                s.flag(gastro::CHARCOT_TRIAD)
                    || (fever(s) && s.flag(gastro::JAUNDICE) && ruq_pain(s))
                    || ctx.has_alert("cholangitis")
                    || ctx.has_alert("cholangitis_shock")
            },
            cascade: vec![
                Branch {
                    tag: "grade_iii",
                    label: "Grade III (severe) acute cholangitis",
                    actions: &[
                        "Organ support and vasopressors as needed",
                        "Broad-spectrum IV antibiotics",
                        "Urgent biliary drainage (ERCP or percutaneous)",
                    ],
                    timeline: "Immediate; drainage as soon as stabilized",
                    applies: |ctx| {
                        let s = ctx.snapshot;
                        hypotension(s).is_some()
                            || s.flag(neuro::ALTERED_MENTAL_STATUS)
                            || above(s, labs::CREATININE, 2.0)
                            || above(s, labs::INR, 1.5)
                            || below(s, labs::PLATELETS, 100.0)
                            || below(s, vitals::SPO2, 90.0)
                    },
                },
                Branch {
                    tag: "grade_ii",
                    label: "Grade II (moderate) acute cholangitis",
                    actions: &[
                        "IV antibiotics",
                        "Early biliary drainage",
                        "Monitor for organ dysfunction",
                    ],
                    timeline: "Drainage within 24 hours",
                    applies: |ctx| {
                        let s = ctx.snapshot;
                        above(s, labs::WBC, 12.0)
                            || below(s, labs::WBC, 4.0)
                            || s.measured(vitals::TEMPERATURE).is_some_and(|t| t >= 39.0)
                            || s.measured(patient::AGE).is_some_and(|a| a >= 75.0)
                            || s.measured(labs::BILIRUBIN).is_some_and(|b| b >= 5.0)
                    },
                },
                Branch {
                    tag: "mild",
                    label: "Grade I (mild) acute cholangitis",
                    actions: &["IV antibiotics", "Biliary drainage if no response within 24 hours"],
                    timeline: "Reassess within 24 hours",
                    applies: always,
                },
            ],
        },
        ProtocolDefinition {
            name: "sepsis",
            domain: Domain::Infectiology,
            activates: |ctx| {
                ctx.has_alert("sepsis_qsofa")
                    || (ctx.snapshot.flag(infect::SUSPECTED_INFECTION)
                        && sirs::criteria_met(ctx.snapshot))
            },
            cascade: vec![
                Branch {
                    tag: "septic_shock",
                    label: "Septic shock",
                    actions: &[
                        "30 mL/kg crystalloid and vasopressors to MAP 65 mmHg",
                        "Antibiotics within one hour",
                        "ICU referral",
                        "Repeat lactate within 2 hours",
                    ],
                    timeline: "Immediate",
                    applies: |ctx| {
                        let s = ctx.snapshot;
                        s.flag(infect::VASOPRESSORS)
                            || (hypotension(s).is_some() && lactate_above(s, 2.0))
                            || lactate_above(s, 4.0)
                    },
                },
                Branch {
                    tag: "sepsis",
                    label: "Sepsis",
                    actions: &[
                        "Blood cultures before antibiotics",
                        "Antibiotics within one hour",
                        "Measure lactate",
                    ],
                    timeline: "Within 1 hour",
                    applies: |ctx| ctx.has_alert("sepsis_qsofa"),
                },
                Branch {
                    tag: "mild",
                    label: "Suspected infection with SIRS",
                    actions: &["Identify the source", "Cultures as indicated", "Reassess qSOFA hourly"],
                    timeline: "Within 3 hours",
                    applies: always,
                },
            ],
        },
        ProtocolDefinition {
            name: "stroke",
            domain: Domain::Neurology,
            activates: |ctx| {
                nihss::total(ctx.snapshot) > 0
                    || ctx.snapshot.flag(neuro::FOCAL_DEFICIT)
                    || ctx.has_alert("stroke_code")
            },
            cascade: vec![
                Branch {
                    tag: "hemorrhagic",
                    label: "Intracranial hemorrhage",
                    actions: &[
                        "Reverse anticoagulation",
                        "Blood pressure control",
                        "Neurosurgical consultation",
                    ],
                    timeline: "Immediate",
                    applies: |ctx| ctx.snapshot.flag(neuro::INTRACRANIAL_HEMORRHAGE),
                },
                Branch {
                    tag: "thrombolysis",
                    label: "Thrombolysis candidate",
                    actions: &[
                        "IV thrombolysis after contraindication checklist",
                        "CT angiography for large vessel occlusion",
                        "Admit to stroke unit",
                    ],
                    timeline: "Door-to-needle within 60 minutes",
                    applies: |ctx| {
                        ctx.has_alert("stroke_code")
                            && nihss::thrombolysis_eligible(ctx.snapshot, nihss::total(ctx.snapshot))
                    },
                },
                Branch {
                    tag: "large_vessel_occlusion",
                    label: "Suspected large vessel occlusion",
                    actions: &["CT angiography", "Refer for mechanical thrombectomy"],
                    timeline: "Within 24 hours of onset",
                    applies: |ctx| nihss::total(ctx.snapshot) >= 6,
                },
                Branch {
                    tag: "mild",
                    label: "Minor stroke or TIA",
                    actions: &["MRI brain", "Antiplatelet therapy", "Vascular risk work-up"],
                    timeline: "Within 24 hours",
                    applies: always,
                },
            ],
        },
    ]
});

fn tachycardic(snapshot: &Snapshot) -> bool {
    snapshot
        .measured(vitals::HEART_RATE)
        .is_some_and(|hr| hr >= 100.0)
}

/// The protocol table, in output order.
pub fn definitions() -> &'static [ProtocolDefinition] {
    &PROTOCOLS
}

/// One entry per protocol, active or not, in table order.
pub fn activate_protocols(snapshot: &Snapshot, alerts: &[Alert]) -> Vec<Protocol> {
    activate_protocols_for(snapshot, alerts, &Domain::ALL)
}

/// Like [`activate_protocols`], but protocols outside `domains` are listed
/// inactive. `alerts` should be the unfiltered set: a branch that misses an
/// alert falls through to a milder one.
pub fn activate_protocols_for(snapshot: &Snapshot, alerts: &[Alert], domains: &[Domain]) -> Vec<Protocol> {
    let ctx = ProtocolContext { snapshot, alerts };
    PROTOCOLS
        .iter()
        .map(|p| {
            if domains.contains(&p.domain) {
                p.evaluate(&ctx)
            } else {
                Protocol::inactive(p.name)
            }
        })
        .collect()
}
