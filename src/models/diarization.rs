use serde::{Deserialize, Serialize};

/// A speaker-labeled time range from an external diarization collaborator
///
/// Backends (pyannote, speechbrain, energy-based, ...) all reduce to this
/// shape so the overlap-based reconciliation applies uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Backend-assigned speaker label (e.g. "speaker_0")
    pub label: String,
}

impl SpeakerSegment {
    /// Temporal overlap with the `[start, end]` range, in seconds
    pub fn overlap(&self, start: f64, end: f64) -> f64 {
        (self.end.min(end) - self.start.max(start)).max(0.0)
    }
}

/// Common result shape every detector backend produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Number of distinct speakers the backend found
    pub speaker_count: u32,
    /// Speaker-labeled time ranges, ordered by start time
    pub segments: Vec<SpeakerSegment>,
}
