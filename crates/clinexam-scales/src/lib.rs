//! clinexam-scales
//!
//! Clinical scale calculators. Pure functions from an observation snapshot
//! to a `ScoreResult`; no I/O and no shared mutable state. Missing inputs
//! take each scale's neutral value, and a scale with nothing answered yet
//! reports "insufficient data" instead of failing.

pub mod error;
pub mod scales;
pub mod scoring;

use clinexam_core::Snapshot;
use clinexam_core::models::domain::Domain;
use clinexam_core::models::score::ScoreResult;

use error::ScaleError;

/// Trait implemented by each clinical scale.
pub trait Scale: Send + Sync {
    /// Unique identifier (e.g., "child_pugh", "meld_na").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Child-Pugh", "MELD-Na").
    fn name(&self) -> &str;

    fn domain(&self) -> Domain;

    /// Field paths this scale reads.
    fn inputs(&self) -> &[String];

    /// Apply the formula. Callers normally go through [`Scale::compute`],
    /// which handles the nothing-answered case first.
    fn score(&self, snapshot: &Snapshot) -> ScoreResult;

    fn is_computable(&self, snapshot: &Snapshot) -> bool {
        self.inputs().iter().any(|path| snapshot.is_answered(path))
    }

    fn compute(&self, snapshot: &Snapshot) -> ScoreResult {
        if self.is_computable(snapshot) {
            self.score(snapshot)
        } else {
            scoring::not_computable(self.id(), self.name(), self.domain(), self.inputs().len())
        }
    }
}

/// Return all registered scales, in a fixed order.
pub fn all_scales() -> Vec<Box<dyn Scale>> {
    vec![
        Box::new(scales::child_pugh::ChildPugh),
        Box::new(scales::meld_na::MeldNa),
        Box::new(scales::glasgow_blatchford::GlasgowBlatchford),
        Box::new(scales::bisap::Bisap),
        Box::new(scales::isth_bat::IsthBat),
        Box::new(scales::wells_dvt::WellsDvt),
        Box::new(scales::sirs::Sirs),
        Box::new(scales::qsofa::Qsofa),
        Box::new(scales::curb65::Curb65),
        Box::new(scales::gcs::Gcs),
        Box::new(scales::nihss::Nihss),
        Box::new(scales::das28_crp::Das28Crp),
        Box::new(scales::sledai_2k::Sledai2k),
        Box::new(scales::fibromyalgia::Fibromyalgia),
    ]
}

/// Look up a scale by ID.
pub fn get_scale(id: &str) -> Option<Box<dyn Scale>> {
    all_scales().into_iter().find(|s| s.id() == id)
}

/// Compute one scale. An unknown id is a caller bug and fails immediately.
pub fn compute(scale_id: &str, snapshot: &Snapshot) -> Result<ScoreResult, ScaleError> {
    let Some(scale) = get_scale(scale_id) else {
        tracing::warn!(scale_id, "requested unknown scale");
        return Err(ScaleError::UnknownScale(scale_id.to_string()));
    };
    Ok(scale.compute(snapshot))
}

/// Compute every registered scale.
pub fn compute_scores(snapshot: &Snapshot) -> Vec<ScoreResult> {
    compute_scores_for(snapshot, &Domain::ALL)
}

/// Compute the registered scales belonging to `domains`, in registry order.
pub fn compute_scores_for(snapshot: &Snapshot, domains: &[Domain]) -> Vec<ScoreResult> {
    all_scales()
        .iter()
        .filter(|s| domains.contains(&s.domain()))
        .map(|s| s.compute(snapshot))
        .collect()
}
