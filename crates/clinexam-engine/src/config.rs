use clinexam_core::models::domain::Domain;
use serde::{Deserialize, Serialize};

/// Engine-level knobs. Everything else about a recomputation is fixed by
/// the rule tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Domains reported on. Scores, alerts, protocols and suspicion families
    /// outside this set are left out of the result; correlation checks
    /// always run.
    pub domains: Vec<Domain>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            domains: Domain::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    pub fn for_domains(domains: impl IntoIterator<Item = Domain>) -> Self {
        let mut domains: Vec<Domain> = domains.into_iter().collect();
        domains.sort();
        domains.dedup();
        Self { domains }
    }

    pub fn includes(&self, domain: Domain) -> bool {
        self.domains.contains(&domain)
    }
}
