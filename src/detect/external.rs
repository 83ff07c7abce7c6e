use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{DetectorError, SpeakerDetector};
use crate::models::{Detection, SpeakerSegment, Utterance};

/// JSON shape an audio-based diarization collaborator writes to disk
#[derive(Debug, Deserialize)]
struct ExternalDetection {
    segments: Vec<SpeakerSegment>,
}

/// Detector backed by collaborator-produced speaker segments on disk
///
/// Audio-based backends (pyannote and friends) run out of process; their
/// output lands in a JSON file that this detector loads. A missing file
/// means the backend is unavailable in this environment, which is the
/// signal to degrade to the heuristic detector.
#[derive(Debug, Clone)]
pub struct ExternalDetector {
    path: PathBuf,
}

impl ExternalDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Detection, DetectorError> {
        if !self.path.exists() {
            return Err(DetectorError::Unavailable {
                backend: "external".to_string(),
                reason: format!("no diarization output at {:?}", self.path),
            });
        }

        let content = std::fs::read_to_string(&self.path)?;
        let parsed: ExternalDetection = serde_json::from_str(&content)?;

        let mut segments = parsed.segments;
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        let labels: HashSet<&str> = segments.iter().map(|s| s.label.as_str()).collect();

        Ok(Detection {
            speaker_count: labels.len() as u32,
            segments,
        })
    }
}

impl SpeakerDetector for ExternalDetector {
    fn name(&self) -> &'static str {
        "external"
    }

    fn detect(&self, _utterances: &[Utterance]) -> Result<Detection, DetectorError> {
        self.load()
    }
}

/// Load external speaker segments from a file, for callers outside the
/// detector seam
pub fn load_segments(path: &Path) -> Result<Detection, DetectorError> {
    ExternalDetector::new(path).load()
}
