use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{speaker_label, SpeakerSpan, Utterance};

/// Machine-readable annotated transcript
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedTranscript {
    /// Utterances with final speaker assignments
    pub utterances: Vec<AnnotatedUtterance>,
    /// Merged same-speaker spans
    pub spans: Vec<SpeakerSpan>,
    /// Metadata about the processing run, including the speaker count the
    /// labels were produced with
    pub metadata: TranscriptMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedUtterance {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Normalized display label, e.g. "Speaker 01"
    pub speaker: String,
    /// 1-based integer speaker index
    pub assigned_speaker: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMetadata {
    pub total_utterances: usize,
    pub total_spans: usize,
    pub speaker_count: u32,
    pub changes: usize,
    pub duration_seconds: f64,
    /// Detector backend the labels came from
    pub backend: String,
    pub processed_at: DateTime<Utc>,
}

impl AnnotatedTranscript {
    /// Build the output shape from labeled utterances and merged spans
    pub fn from_labeled(
        utterances: &[Utterance],
        spans: Vec<SpeakerSpan>,
        speaker_count: u32,
        changes: usize,
        backend: impl Into<String>,
    ) -> Self {
        let annotated: Vec<AnnotatedUtterance> = utterances
            .iter()
            .map(|u| {
                let index = u.assigned_speaker.unwrap_or(1);
                AnnotatedUtterance {
                    id: u.id.clone(),
                    start: u.start,
                    end: u.end,
                    text: u.text.clone(),
                    speaker: speaker_label(index),
                    assigned_speaker: index,
                }
            })
            .collect();

        let duration_seconds = utterances
            .last()
            .map(|u| u.end)
            .unwrap_or(0.0)
            - utterances.first().map(|u| u.start).unwrap_or(0.0);

        let metadata = TranscriptMetadata {
            total_utterances: utterances.len(),
            total_spans: spans.len(),
            speaker_count,
            changes,
            duration_seconds: duration_seconds.max(0.0),
            backend: backend.into(),
            processed_at: Utc::now(),
        };

        Self {
            utterances: annotated,
            spans,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable transcript rendering
pub struct HumanTranscript<'a> {
    utterances: &'a [Utterance],
    spans: &'a [SpeakerSpan],
}

impl<'a> HumanTranscript<'a> {
    pub fn new(utterances: &'a [Utterance], spans: &'a [SpeakerSpan]) -> Self {
        Self { utterances, spans }
    }

    /// Format as speaker-headed paragraphs with timestamps
    pub fn format(&self) -> String {
        let mut output = String::new();

        for span in self.spans {
            let start_time = format_timestamp(span.start);
            output.push_str(&format!("[{}] {}:\n", start_time, span.label()));

            let text: Vec<&str> = span
                .utterance_indices
                .iter()
                .filter_map(|&i| self.utterances.get(i))
                .map(|u| u.text.trim())
                .filter(|t| !t.is_empty())
                .collect();

            let wrapped = wrap_text(&text.join(" "), 80);
            output.push_str(&wrapped);
            output.push_str("\n\n");
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS.mmm
fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let secs = total_ms / 1000;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}.{:03}", secs / 60, secs % 60, millis)
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::merge_spans;

    fn labeled(start: f64, end: f64, text: &str, speaker: u32) -> Utterance {
        let mut u = Utterance::new(start, end, text);
        u.assigned_speaker = Some(speaker);
        u
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00.000");
        assert_eq!(format_timestamp(1.5), "00:01.500");
        assert_eq!(format_timestamp(65.0), "01:05.000");
        assert_eq!(format_timestamp(3661.5), "61:01.500");
    }

    #[test]
    fn test_annotated_transcript_shape() {
        let utterances = vec![
            labeled(0.0, 2.0, "Hello there", 1),
            labeled(2.5, 3.0, "Hi", 2),
        ];
        let spans = merge_spans(&utterances, 1.0);

        let transcript =
            AnnotatedTranscript::from_labeled(&utterances, spans, 2, 1, "heuristic");

        assert_eq!(transcript.utterances.len(), 2);
        assert_eq!(transcript.utterances[0].speaker, "Speaker 01");
        assert_eq!(transcript.utterances[1].speaker, "Speaker 02");
        assert_eq!(transcript.metadata.total_spans, 2);
        assert!((transcript.metadata.duration_seconds - 3.0).abs() < 1e-9);
        assert_eq!(transcript.metadata.backend, "heuristic");
    }

    #[test]
    fn test_human_format_headers() {
        let utterances = vec![
            labeled(0.0, 2.0, "Hello there", 1),
            labeled(65.0, 66.0, "Hi", 2),
        ];
        let spans = merge_spans(&utterances, 1.0);
        let rendered = HumanTranscript::new(&utterances, &spans).format();

        assert!(rendered.contains("[00:00.000] Speaker 01:"));
        assert!(rendered.contains("[01:05.000] Speaker 02:"));
        assert!(rendered.contains("Hello there"));
    }

    #[test]
    fn test_write_json_roundtrip() {
        let utterances = vec![labeled(0.0, 2.0, "Hello", 1)];
        let spans = merge_spans(&utterances, 1.0);
        let transcript =
            AnnotatedTranscript::from_labeled(&utterances, spans, 1, 0, "heuristic");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        transcript.write_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["metadata"]["speaker_count"], 1);
        // The count lives in metadata only, so it cannot drift from a
        // second copy
        assert!(value.get("speaker_count").is_none());
        assert_eq!(value["utterances"][0]["speaker"], "Speaker 01");
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a test of the text wrapping function that should wrap at 20 chars";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.len() <= 25); // Allow some slack for long words
        }
    }
}
