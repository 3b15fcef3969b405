use clinexam_core::Snapshot;
use clinexam_core::models::recomputation::Recomputation;
use clinexam_scales::compute_scores;

use crate::alerts::{derive_triage_level, evaluate_alerts, evaluate_alerts_for};
use crate::config::EngineConfig;
use crate::cross_validation::cross_validate_for;
use crate::progress::compute_progress;
use crate::protocols::activate_protocols_for;

/// Runs every component over one snapshot, in dependency order.
///
/// Holds no state between calls. Callers that share one session across
/// threads should serialize recomputations so each result stays coherent.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn recompute(&self, snapshot: &Snapshot) -> Recomputation {
        let domains = &self.config.domains;
        // Protocols and suspicions see every score and alert so a domain
        // selection hides results instead of changing them.
        let all_scores = compute_scores(snapshot);
        let all_alerts = evaluate_alerts(snapshot, &all_scores);

        let alerts = evaluate_alerts_for(snapshot, &all_scores, domains);
        let triage = derive_triage_level(&alerts);
        let protocols = activate_protocols_for(snapshot, &all_alerts, domains);
        let cross_validation = cross_validate_for(snapshot, &all_scores, domains);
        let progress = compute_progress(snapshot);
        let scores: Vec<_> = all_scores
            .into_iter()
            .filter(|s| domains.contains(&s.domain))
            .collect();

        tracing::debug!(
            scores = scores.iter().filter(|s| s.is_computable()).count(),
            alerts = alerts.len(),
            active_protocols = protocols.iter().filter(|p| p.active).count(),
            inconsistencies = cross_validation.inconsistencies.len(),
            progress,
            ?triage,
            "Recomputed snapshot"
        );

        Recomputation {
            scores,
            alerts,
            triage,
            protocols,
            cross_validation,
            progress,
        }
    }
}

/// Recompute with every domain enabled.
pub fn recompute(snapshot: &Snapshot) -> Recomputation {
    Engine::default().recompute(snapshot)
}
