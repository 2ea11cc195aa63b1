//! Edge I/O for the batch binary
//!
//! - Volcano catalog: one JSON array of candidates
//! - Samples: JSON Lines, one sample per line
//! - Results: JSON Lines, one match record per line
//!
//! Malformed records are logged and skipped here, so the engine only ever
//! sees validated input.

use std::path::Path;
use tracing::{info, warn};
use vmatch_common::models::{MatchResult, Sample, VolcanoCandidate};
use vmatch_common::{Error, Result};

/// Parse a volcano catalog, dropping invalid entries
pub fn parse_volcanoes(content: &str) -> Result<Vec<VolcanoCandidate>> {
    let raw: Vec<VolcanoCandidate> = serde_json::from_str(content)?;
    let total = raw.len();

    let volcanoes: Vec<VolcanoCandidate> = raw
        .into_iter()
        .filter(|v| match v.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(volcano_id = %v.id, error = %e, "Skipping invalid volcano");
                false
            }
        })
        .collect();

    if volcanoes.len() < total {
        warn!(
            skipped = total - volcanoes.len(),
            "Some catalog entries were invalid"
        );
    }
    Ok(volcanoes)
}

/// Parse JSON Lines samples, skipping blank, malformed and invalid lines
pub fn parse_samples(content: &str) -> Vec<Sample> {
    let mut samples = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sample: Sample = match serde_json::from_str(line) {
            Ok(sample) => sample,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "Skipping malformed sample line");
                continue;
            }
        };
        if let Err(e) = sample.validate() {
            warn!(line = line_no + 1, error = %e, "Skipping invalid sample");
            continue;
        }
        samples.push(sample);
    }
    samples
}

/// Serialize results as JSON Lines
pub fn to_json_lines(results: &[MatchResult]) -> Result<String> {
    let mut out = String::new();
    for result in results {
        out.push_str(&serde_json::to_string(result)?);
        out.push('\n');
    }
    Ok(out)
}

/// Load the volcano catalog
pub async fn load_volcanoes(path: &Path) -> Result<Vec<VolcanoCandidate>> {
    let content = tokio::fs::read_to_string(path).await?;
    let volcanoes = parse_volcanoes(&content)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;
    info!(count = volcanoes.len(), path = %path.display(), "Volcano catalog loaded");
    Ok(volcanoes)
}

/// Load samples from a JSON Lines file
pub async fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    let content = tokio::fs::read_to_string(path).await?;
    let samples = parse_samples(&content);
    info!(count = samples.len(), path = %path.display(), "Samples loaded");
    Ok(samples)
}

/// Write results to a JSON Lines file, replacing any previous run
pub async fn write_results(path: &Path, results: &[MatchResult]) -> Result<()> {
    let content = to_json_lines(results)?;
    tokio::fs::write(path, content).await?;
    info!(count = results.len(), path = %path.display(), "Results written");
    Ok(())
}
