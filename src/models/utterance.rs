use serde::{Deserialize, Serialize};

use super::TranscriptionSegment;

/// A single transcribed utterance with second-resolution timestamps
///
/// `start`, `end` and `text` come from the transcription engine and are
/// never modified. `assigned_speaker` is written by the attribution engine
/// during processing and is `None` until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// Unique identifier for this utterance (UUID)
    pub id: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds (>= start)
    pub end: f64,
    /// Transcribed text - may be empty
    pub text: String,
    /// 1-based speaker index, set by the attribution engine
    pub assigned_speaker: Option<u32>,
}

impl Utterance {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start,
            end,
            text: text.into(),
            assigned_speaker: None,
        }
    }

    /// Create an utterance from a transcription collaborator segment
    pub fn from_segment(segment: &TranscriptionSegment) -> Self {
        Self::new(segment.start, segment.end, segment.text.clone().unwrap_or_default())
    }

    /// Duration of this utterance in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Silence between the end of `previous` and the start of this utterance
    ///
    /// Overlapping or out-of-order timestamps yield zero rather than a
    /// negative gap.
    pub fn gap_since(&self, previous: &Utterance) -> f64 {
        let gap = self.start - previous.end;
        if gap.is_finite() { gap.max(0.0) } else { 0.0 }
    }
}

/// A maximal run of consecutive utterances sharing a speaker
///
/// Produced by the span merge step for presentation and statistics; the
/// engine itself only writes `assigned_speaker` on utterances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerSpan {
    /// 1-based speaker index
    pub speaker: u32,
    /// Start of the first member utterance, in seconds
    pub start: f64,
    /// End of the last member utterance, in seconds
    pub end: f64,
    /// Sum of member utterance durations (excludes gaps), in seconds
    pub duration: f64,
    /// Indices of member utterances, in order
    pub utterance_indices: Vec<usize>,
}

impl SpeakerSpan {
    /// Number of utterances in this span
    pub fn utterance_count(&self) -> usize {
        self.utterance_indices.len()
    }

    /// Normalized display label for the speaker, e.g. "Speaker 01"
    pub fn label(&self) -> String {
        speaker_label(self.speaker)
    }
}

/// Format a 1-based speaker index as a display label with a zero-padded
/// numeric suffix
pub fn speaker_label(speaker: u32) -> String {
    format!("Speaker {:02}", speaker)
}
