use clinexam_core::Snapshot;
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::{RiskTier, ScoreComponent, ScoreResult};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Defines the valid range for an input or score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    /// Integer-valued range, `step = 1`.
    pub const fn graded(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: Some(1.0),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    /// Bring an out-of-domain value into range, snapping to the step grid.
    pub fn clamp(&self, value: f64) -> f64 {
        let bounded = value.max(self.min).min(self.max);
        match self.step {
            Some(step) if step > 0.0 => {
                let snapped = self.min + ((bounded - self.min) / step).round() * step;
                snapped.min(self.max)
            }
            _ => bounded,
        }
    }
}

/// Read a number clamped into `range`, or `neutral` when unanswered.
pub fn read_clamped(snapshot: &Snapshot, path: &str, range: ScoreRange, neutral: f64) -> f64 {
    snapshot
        .number(path)
        .map(|v| range.clamp(v))
        .unwrap_or(neutral)
}

pub fn count_flags<S: AsRef<str>>(snapshot: &Snapshot, paths: &[S]) -> usize {
    paths.iter().filter(|p| snapshot.flag(p.as_ref())).count()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

/// Result for a scale with none of its inputs answered.
pub fn not_computable(id: &str, name: &str, domain: Domain, input_count: usize) -> ScoreResult {
    ScoreResult {
        scale_id: id.to_string(),
        name: name.to_string(),
        domain,
        value: None,
        components: Vec::new(),
        interpretation: format!(
            "Insufficient data: none of the {input_count} {name} inputs have been recorded"
        ),
        risk_tier: RiskTier::Low,
        recommendations: Vec::new(),
    }
}

/// Assembles a computed `ScoreResult`.
pub struct ScoreBuilder {
    result: ScoreResult,
}

impl ScoreBuilder {
    pub fn new(id: &str, name: &str, domain: Domain, value: f64) -> Self {
        Self {
            result: ScoreResult {
                scale_id: id.to_string(),
                name: name.to_string(),
                domain,
                value: Some(value),
                components: Vec::new(),
                interpretation: String::new(),
                risk_tier: RiskTier::Low,
                recommendations: Vec::new(),
            },
        }
    }

    pub fn component(mut self, label: &str, value: f64) -> Self {
        self.result.components.push(ScoreComponent {
            label: label.to_string(),
            value,
        });
        self
    }

    pub fn flag(self, label: &str, set: bool) -> Self {
        self.component(label, if set { 1.0 } else { 0.0 })
    }

    pub fn interpretation(mut self, text: impl Into<String>) -> Self {
        self.result.interpretation = text.into();
        self
    }

    pub fn tier(mut self, tier: RiskTier) -> Self {
        self.result.risk_tier = tier;
        self
    }

    pub fn recommend(mut self, text: impl Into<String>) -> Self {
        self.result.recommendations.push(text.into());
        self
    }

    pub fn build(self) -> ScoreResult {
        self.result
    }
}
