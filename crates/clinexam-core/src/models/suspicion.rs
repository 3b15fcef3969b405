use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Likelihood {
    Low,
    Moderate,
    High,
}

/// A syndrome hypothesis inferred from correlated findings. Not a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosticSuspicion {
    pub family: String,
    pub syndrome: String,
    pub likelihood: Likelihood,
    pub supporting_findings: Vec<String>,
    pub recommendation: String,
}
