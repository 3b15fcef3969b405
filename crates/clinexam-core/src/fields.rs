//! Field-path conventions.
//!
//! Dotted paths into the observation snapshot. These define the canonical
//! layout the form layer writes and every calculator, rule and check reads.

pub mod patient {
    pub const AGE: &str = "patient.age";
    /// Category: `male` / `female`.
    pub const SEX: &str = "patient.sex";
}

pub mod vitals {
    pub const SYSTOLIC_BP: &str = "vitals.systolic_bp";
    pub const DIASTOLIC_BP: &str = "vitals.diastolic_bp";
    pub const HEART_RATE: &str = "vitals.heart_rate";
    pub const RESPIRATORY_RATE: &str = "vitals.respiratory_rate";
    /// Degrees Celsius.
    pub const TEMPERATURE: &str = "vitals.temperature";
    /// Percent.
    pub const SPO2: &str = "vitals.spo2";
}

pub mod labs {
    /// g/dL
    pub const HEMOGLOBIN: &str = "labs.hemoglobin";
    /// ×10⁹/L
    pub const WBC: &str = "labs.wbc";
    /// ×10⁹/L
    pub const PLATELETS: &str = "labs.platelets";
    /// Absolute neutrophil count, cells/µL.
    pub const ANC: &str = "labs.anc";
    /// Blood urea nitrogen, mg/dL.
    pub const BUN: &str = "labs.bun";
    /// Urea, mmol/L.
    pub const UREA: &str = "labs.urea";
    /// mg/dL
    pub const CREATININE: &str = "labs.creatinine";
    /// mmol/L
    pub const SODIUM: &str = "labs.sodium";
    /// mg/dL
    pub const BILIRUBIN: &str = "labs.bilirubin";
    /// g/dL
    pub const ALBUMIN: &str = "labs.albumin";
    pub const INR: &str = "labs.inr";
    /// mg/L
    pub const CRP: &str = "labs.crp";
    /// mmol/L
    pub const LACTATE: &str = "labs.lactate";
}

pub mod gastro {
    pub const CHARCOT_TRIAD: &str = "gastro.biliary.charcot_triad";
    pub const RUQ_PAIN: &str = "gastro.biliary.ruq_pain";
    pub const MURPHY_SIGN: &str = "gastro.biliary.murphy_sign";
    pub const JAUNDICE: &str = "gastro.biliary.jaundice";

    /// 0 none, 1 mild, 2 moderate, 3 tense.
    pub const ASCITES_GRADE: &str = "gastro.liver.ascites_grade";
    /// West Haven grade, 0–3 as recorded on the form.
    pub const ENCEPHALOPATHY_GRADE: &str = "gastro.liver.encephalopathy_grade";
    pub const DIALYSIS: &str = "gastro.liver.dialysis";

    pub const MELENA: &str = "gastro.bleeding.melena";
    pub const HEMATEMESIS: &str = "gastro.bleeding.hematemesis";
    pub const HEMATOCHEZIA: &str = "gastro.bleeding.hematochezia";
    pub const SYNCOPE: &str = "gastro.bleeding.syncope";

    pub const HEPATIC_DISEASE: &str = "gastro.history.hepatic_disease";
    pub const HEART_FAILURE: &str = "gastro.history.heart_failure";

    pub const PLEURAL_EFFUSION: &str = "gastro.pancreas.pleural_effusion";

    pub const SEVERE_PAIN: &str = "gastro.abdomen.severe_pain";
    pub const REBOUND: &str = "gastro.abdomen.rebound_tenderness";
    pub const GUARDING: &str = "gastro.abdomen.guarding";
    pub const RIGIDITY: &str = "gastro.abdomen.rigidity";
    pub const DISTENSION: &str = "gastro.abdomen.distension";
    pub const VOMITING: &str = "gastro.abdomen.vomiting";
    pub const ABSENT_BOWEL_SOUNDS: &str = "gastro.abdomen.absent_bowel_sounds";
    pub const MCBURNEY: &str = "gastro.abdomen.mcburney_tenderness";
    /// Category: `ruq`, `luq`, `rlq`, `llq`, `epigastric`, `periumbilical`, `diffuse`.
    pub const PAIN_LOCATION: &str = "gastro.abdomen.pain_location";
}

pub mod hematology {
    /// Multi-select of ISTH-BAT cutaneous items.
    pub const BLEEDING_CUTANEOUS: &str = "hematology.bleeding.cutaneous";
    /// Multi-select of ISTH-BAT mucosal items.
    pub const BLEEDING_MUCOSAL: &str = "hematology.bleeding.mucosal";
    /// Multi-select of ISTH-BAT surgical items.
    pub const BLEEDING_SURGICAL: &str = "hematology.bleeding.surgical";

    pub const PETECHIAE: &str = "hematology.exam.petechiae";
    pub const LYMPHADENOPATHY: &str = "hematology.exam.lymphadenopathy";
    pub const SPLENOMEGALY: &str = "hematology.exam.splenomegaly";
    pub const BLASTS: &str = "hematology.smear.blasts";

    pub mod wells {
        pub const ACTIVE_CANCER: &str = "hematology.wells.active_cancer";
        pub const PARALYSIS: &str = "hematology.wells.paralysis_or_cast";
        pub const BEDRIDDEN: &str = "hematology.wells.bedridden_or_surgery";
        pub const LOCALIZED_TENDERNESS: &str = "hematology.wells.localized_tenderness";
        pub const LEG_SWOLLEN: &str = "hematology.wells.entire_leg_swollen";
        pub const CALF_SWELLING: &str = "hematology.wells.calf_swelling";
        pub const PITTING_EDEMA: &str = "hematology.wells.pitting_edema";
        pub const COLLATERAL_VEINS: &str = "hematology.wells.collateral_veins";
        pub const PREVIOUS_DVT: &str = "hematology.wells.previous_dvt";
        pub const ALTERNATIVE_LIKELY: &str = "hematology.wells.alternative_diagnosis_likely";
    }
}

pub mod infect {
    pub const SUSPECTED_INFECTION: &str = "infect.suspected_infection";
    pub const REPORTED_FEVER: &str = "infect.reported_fever";
    pub const NECK_STIFFNESS: &str = "infect.neck_stiffness";
    pub const VASOPRESSORS: &str = "infect.vasopressors";
    pub const PRODUCTIVE_COUGH: &str = "infect.productive_cough";
}

pub mod neuro {
    pub const ALTERED_MENTAL_STATUS: &str = "neuro.altered_mental_status";

    pub const GCS_EYE: &str = "neuro.gcs.eye";
    pub const GCS_VERBAL: &str = "neuro.gcs.verbal";
    pub const GCS_MOTOR: &str = "neuro.gcs.motor";

    /// Hours since last known well.
    pub const ONSET_HOURS: &str = "neuro.stroke.onset_hours";
    pub const INTRACRANIAL_HEMORRHAGE: &str = "neuro.stroke.hemorrhage_on_imaging";
    pub const ANTICOAGULATED: &str = "neuro.stroke.anticoagulated";

    pub const THUNDERCLAP_HEADACHE: &str = "neuro.headache.thunderclap";
    pub const NEW_HEADACHE: &str = "neuro.headache.new_onset";

    pub const FOCAL_DEFICIT: &str = "neuro.exam.focal_deficit";
    pub const SYMPTOMS_RESOLVED: &str = "neuro.exam.symptoms_resolved";
    /// Category: `left` / `right`.
    pub const FACIAL_PALSY_SIDE: &str = "neuro.exam.facial_palsy_side";
    /// Category: `left` / `right`.
    pub const LIMB_WEAKNESS_SIDE: &str = "neuro.exam.limb_weakness_side";

    pub mod nihss {
        pub const CONSCIOUSNESS: &str = "neuro.nihss.consciousness";
        pub const QUESTIONS: &str = "neuro.nihss.questions";
        pub const COMMANDS: &str = "neuro.nihss.commands";
        pub const GAZE: &str = "neuro.nihss.gaze";
        pub const VISUAL: &str = "neuro.nihss.visual";
        pub const FACIAL: &str = "neuro.nihss.facial";
        pub const MOTOR_ARM: &str = "neuro.nihss.motor_arm";
        pub const MOTOR_LEG: &str = "neuro.nihss.motor_leg";
        pub const ATAXIA: &str = "neuro.nihss.ataxia";
        pub const SENSORY: &str = "neuro.nihss.sensory";
        pub const LANGUAGE: &str = "neuro.nihss.language";
        pub const DYSARTHRIA: &str = "neuro.nihss.dysarthria";
        pub const EXTINCTION: &str = "neuro.nihss.extinction";
    }
}

pub mod rheum {
    pub const TENDER_JOINTS: &str = "rheum.das28.tender_joints";
    pub const SWOLLEN_JOINTS: &str = "rheum.das28.swollen_joints";
    /// Patient global assessment, 0–100 mm.
    pub const PATIENT_GLOBAL: &str = "rheum.das28.patient_global";

    pub const HOT_SWOLLEN_JOINT: &str = "rheum.joint.hot_swollen_monoarthritis";

    pub const JAW_CLAUDICATION: &str = "rheum.vasculitis.jaw_claudication";
    pub const VISUAL_LOSS: &str = "rheum.vasculitis.visual_loss";
    pub const TEMPORAL_TENDERNESS: &str = "rheum.vasculitis.temporal_artery_tenderness";

    /// Prefix for the SLEDAI-2K descriptor flags (`rheum.sledai.<descriptor>`).
    pub const SLEDAI: &str = "rheum.sledai";

    /// Prefix for the seventeen widespread-pain region flags.
    pub const FIBRO_REGIONS: &str = "rheum.fibro.regions";
    pub const FIBRO_FATIGUE: &str = "rheum.fibro.fatigue";
    pub const FIBRO_WAKING_UNREFRESHED: &str = "rheum.fibro.waking_unrefreshed";
    pub const FIBRO_COGNITIVE: &str = "rheum.fibro.cognitive_symptoms";
    pub const FIBRO_SOMATIC_COUNT: &str = "rheum.fibro.somatic_symptom_count";
}

/// Join a section prefix and a leaf key.
pub fn join(prefix: &str, key: &str) -> String {
    format!("{prefix}.{key}")
}
