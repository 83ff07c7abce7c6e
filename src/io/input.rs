use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{TranscriptionResponse, Utterance};

/// Parse a transcription collaborator JSON file into utterances
pub fn parse_transcription_file(path: &Path) -> Result<Vec<Utterance>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcription_json(&content)
}

/// Parse a transcription collaborator JSON string into utterances
///
/// Segment order is preserved as delivered; the engine assumes the
/// collaborator emits utterances in time order.
pub fn parse_transcription_json(json: &str) -> Result<Vec<Utterance>> {
    let response: TranscriptionResponse =
        serde_json::from_str(json).context("Failed to parse transcription JSON")?;

    Ok(response
        .segments()
        .iter()
        .map(Utterance::from_segment)
        .collect())
}
