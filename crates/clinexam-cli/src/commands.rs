use std::path::Path;

use clinexam_core::models::domain::Domain;
use clinexam_core::models::recomputation::{CompletionPayload, Recomputation};
use clinexam_core::models::score::ScoreResult;
use clinexam_core::{Leaf, Snapshot};
use clinexam_engine::Engine;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleInfo {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub inputs: Vec<String>,
}

pub fn read_snapshot(path: &Path) -> eyre::Result<Snapshot> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read snapshot at {}: {e}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Snapshot::new());
    }
    Ok(Snapshot::from_json(&contents)?)
}

/// Write `contents` through a temp file and rename, so readers never see a
/// half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> eyre::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("not a file path: {}", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> eyre::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

pub fn list_scales(domain: Option<Domain>) -> Vec<ScaleInfo> {
    clinexam_scales::all_scales()
        .iter()
        .filter(|s| domain.is_none_or(|d| s.domain() == d))
        .map(|s| ScaleInfo {
            id: s.id().to_string(),
            name: s.name().to_string(),
            domain: s.domain(),
            inputs: s.inputs().to_vec(),
        })
        .collect()
}

pub fn score(scale_id: &str, snapshot_path: &Path) -> eyre::Result<ScoreResult> {
    let snapshot = read_snapshot(snapshot_path)?;
    Ok(clinexam_scales::compute(scale_id, &snapshot)?)
}

pub fn recompute(engine: &Engine, snapshot_path: &Path) -> eyre::Result<Recomputation> {
    let snapshot = read_snapshot(snapshot_path)?;
    Ok(engine.recompute(&snapshot))
}

/// Set one leaf in the snapshot file and write it back. A missing file
/// starts a new, empty snapshot.
pub fn set_leaf(snapshot_path: &Path, path: &str, raw_value: &str) -> eyre::Result<Snapshot> {
    let snapshot = if snapshot_path.exists() {
        read_snapshot(snapshot_path)?
    } else {
        Snapshot::new()
    };

    let value: serde_json::Value = serde_json::from_str(raw_value)
        .map_err(|e| eyre::eyre!("value for {path} is not valid JSON: {e}"))?;
    let leaf: Leaf = serde_json::from_value(value)
        .map_err(|e| eyre::eyre!("value for {path} is not a recognised leaf: {e}"))?;

    let updated = snapshot.with(path, leaf)?;
    let json = serde_json::to_string_pretty(&updated)?;
    write_atomic(snapshot_path, &json)?;

    tracing::info!(path, file = %snapshot_path.display(), "snapshot updated");
    Ok(updated)
}

pub fn complete(engine: &Engine, snapshot_path: &Path) -> eyre::Result<CompletionPayload> {
    let snapshot = read_snapshot(snapshot_path)?;
    let payload = engine.recompute(&snapshot).complete(snapshot);
    tracing::info!(
        session_id = %payload.session_id,
        triage = ?payload.results.triage,
        "assessment completed"
    );
    Ok(payload)
}
