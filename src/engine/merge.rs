//! Span merge: coalesce consecutive same-speaker utterances
//!
//! Spans partition the utterance sequence in order; an utterance joins the
//! open span only when the speaker matches and the silence since the span's
//! last utterance stays under the merge gap.

use crate::models::{SpeakerSpan, Utterance};

/// Merge labeled utterances into contiguous speaker spans
///
/// Utterances without an assigned speaker are treated as speaker 1, which
/// only occurs when callers skip the attribution pass.
pub fn merge_spans(utterances: &[Utterance], merge_gap_seconds: f64) -> Vec<SpeakerSpan> {
    let mut spans: Vec<SpeakerSpan> = Vec::new();

    for (index, utterance) in utterances.iter().enumerate() {
        let speaker = utterance.assigned_speaker.unwrap_or(1);

        if let Some(span) = spans.last_mut() {
            if span.speaker == speaker && utterance.start - span.end < merge_gap_seconds {
                span.end = utterance.end;
                span.duration += utterance.duration();
                span.utterance_indices.push(index);
                continue;
            }
        }

        spans.push(SpeakerSpan {
            speaker,
            start: utterance.start,
            end: utterance.end,
            duration: utterance.duration(),
            utterance_indices: vec![index],
        });
    }

    spans
}
