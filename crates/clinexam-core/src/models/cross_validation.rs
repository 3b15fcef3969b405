use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::suspicion::DiagnosticSuspicion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CorrelationStatus {
    Consistent,
    Inconsistent,
}

/// Outcome of one anatomical/clinical correlation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CorrelationCheck {
    pub id: String,
    pub findings: Vec<String>,
    pub status: CorrelationStatus,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrossValidation {
    /// Consistent correlations, informational only.
    pub correlations: Vec<CorrelationCheck>,
    /// Inconsistent correlations, surfaced as clinical inconsistency warnings.
    pub inconsistencies: Vec<CorrelationCheck>,
    pub suspicions: Vec<DiagnosticSuspicion>,
}
