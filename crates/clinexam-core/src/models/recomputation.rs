use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::alert::{Alert, TriageLevel};
use super::cross_validation::CrossValidation;
use super::protocol::Protocol;
use super::score::ScoreResult;
use crate::snapshot::Snapshot;

/// Everything one recomputation returns, as a single coherent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recomputation {
    pub scores: Vec<ScoreResult>,
    pub alerts: Vec<Alert>,
    pub triage: TriageLevel,
    pub protocols: Vec<Protocol>,
    pub cross_validation: CrossValidation,
    /// Percentage of answered leaves, 0–100.
    pub progress: u8,
}

impl Recomputation {
    /// Package the final snapshot and its results for the persistence layer.
    pub fn complete(self, snapshot: Snapshot) -> CompletionPayload {
        CompletionPayload {
            session_id: Uuid::new_v4(),
            completed_at: jiff::Timestamp::now(),
            snapshot,
            results: self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletionPayload {
    pub session_id: Uuid,
    pub completed_at: jiff::Timestamp,
    #[ts(type = "Record<string, unknown>")]
    pub snapshot: Snapshot,
    pub results: Recomputation,
}
