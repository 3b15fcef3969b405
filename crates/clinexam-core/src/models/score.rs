use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::domain::Domain;

/// Coarse risk classification attached to every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Low,
    Intermediate,
    High,
    Critical,
}

/// A named sub-value of a composite score (e.g. the pre-sodium MELD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreComponent {
    pub label: String,
    pub value: f64,
}

/// Output of one scale over one snapshot. A value, never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub scale_id: String,
    pub name: String,
    pub domain: Domain,
    /// `None` while the scale has none of its inputs answered.
    pub value: Option<f64>,
    pub components: Vec<ScoreComponent>,
    pub interpretation: String,
    pub risk_tier: RiskTier,
    pub recommendations: Vec<String>,
}

impl ScoreResult {
    pub fn is_computable(&self) -> bool {
        self.value.is_some()
    }

    pub fn component(&self, label: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.value)
    }
}

/// Find a computed score by scale id.
pub fn find_score<'a>(scores: &'a [ScoreResult], scale_id: &str) -> Option<&'a ScoreResult> {
    scores.iter().find(|s| s.scale_id == scale_id)
}

/// Numeric value of a computed score, if present and computable.
pub fn score_value(scores: &[ScoreResult], scale_id: &str) -> Option<f64> {
    find_score(scores, scale_id).and_then(|s| s.value)
}
