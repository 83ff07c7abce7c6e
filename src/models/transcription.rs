use serde::{Deserialize, Serialize};

/// Top-level JSON shape produced by the transcription collaborator
///
/// The engine only requires per-segment timing and text; everything else in
/// the collaborator's response is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub segments: Vec<TranscriptionSegment>,
}

impl TranscriptionResponse {
    pub fn segments(&self) -> &[TranscriptionSegment] {
        &self.segments
    }
}

/// One transcribed segment from the transcription collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Transcribed text; absent text is treated as empty
    #[serde(default)]
    pub text: Option<String>,
}
