pub mod change;
pub mod count;
pub mod lexicon;
pub mod merge;

pub use change::{change_probability, should_change_speaker, ChangeContext};
pub use count::{collect_stats, estimate_speaker_count, ConversationStats};
pub use merge::merge_spans;

use tracing::debug;

use crate::models::{SpeakerSpan, Utterance};

/// Tunable constants for the attribution engine
///
/// The thresholds are empirically tuned, not derived from a model; they are
/// deliberately plain named parameters rather than hidden magic numbers.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lower bound on the estimated speaker count
    pub min_speakers: u32,
    /// Hard cap on the estimated speaker count
    pub max_speakers: u32,
    /// Maximum utterances sampled by the count estimator
    pub sample_limit: usize,
    /// Silence above this counts as a pause change in the estimator, seconds
    pub pause_gap_seconds: f64,
    /// Maximum silence bridged when merging same-speaker spans, seconds
    pub merge_gap_seconds: f64,
    /// Change-probability decision threshold
    pub change_threshold: f64,
    /// Fast-path threshold: above this a change is taken outright
    pub fast_change_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_speakers: 1,
            max_speakers: 4,
            sample_limit: 100,
            pause_gap_seconds: 0.8,
            merge_gap_seconds: 1.0,
            change_threshold: 0.5,
            fast_change_threshold: 0.8,
        }
    }
}

/// Outcome of one attribution pass
#[derive(Debug, Clone)]
pub struct AttributionResult {
    /// Speaker count the pass ran with
    pub speaker_count: u32,
    /// Number of speaker changes detected
    pub changes: usize,
    /// Merged same-speaker spans, in order
    pub spans: Vec<SpeakerSpan>,
}

/// The heuristic speaker attribution engine
///
/// Deterministic and stateless across calls: reprocessing the same input
/// with the same speaker count yields identical labels.
#[derive(Debug, Clone, Default)]
pub struct AttributionEngine {
    config: EngineConfig,
}

impl AttributionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimate the speaker count, then label every utterance in place
    pub fn attribute(&self, utterances: &mut [Utterance]) -> AttributionResult {
        let speaker_count = estimate_speaker_count(utterances, &self.config);
        self.attribute_with_count(utterances, speaker_count)
    }

    /// Label every utterance in place with a caller-supplied speaker count
    ///
    /// The count is clamped to what the data can support, so labels never
    /// fall outside `[1, K]` even for an incompatible request.
    pub fn attribute_with_count(
        &self,
        utterances: &mut [Utterance],
        speaker_count: u32,
    ) -> AttributionResult {
        let speaker_count = self.clamp_count(speaker_count, utterances.len());

        let mut changes = 0;
        let mut current_speaker = 1u32;
        // The first utterance opens the first run, so one utterance has
        // already elapsed by the first decision point
        let mut since_change = 1usize;

        for i in 0..utterances.len() {
            if i > 0 {
                let time_gap = utterances[i].gap_since(&utterances[i - 1]);
                let context = ChangeContext {
                    current: &utterances[i].text,
                    previous: &utterances[i - 1].text,
                    time_gap,
                    utterances_since_change: since_change,
                    speaker_count,
                };

                if should_change_speaker(&context, &self.config) {
                    current_speaker = change::rotate_speaker(current_speaker, speaker_count);
                    changes += 1;
                    since_change = 1;
                } else {
                    since_change += 1;
                }
            }

            utterances[i].assigned_speaker = Some(current_speaker);
        }

        debug!(
            utterances = utterances.len(),
            speaker_count, changes, "attribution pass complete"
        );

        let spans = merge_spans(utterances, self.config.merge_gap_seconds);

        AttributionResult {
            speaker_count,
            changes,
            spans,
        }
    }

    fn clamp_count(&self, requested: u32, utterance_count: usize) -> u32 {
        // Tolerate a zeroed or inverted configuration rather than panic
        let min = self.config.min_speakers.max(1);
        let max = self.config.max_speakers.max(min);
        let data_cap = (utterance_count as u32).max(1);
        requested.clamp(min, max).min(data_cap)
    }
}

/// Number of adjacent pairs whose labels differ
///
/// Recomputes the change count from whatever labels the utterances carry
/// now, e.g. after external reconciliation has overridden part of a pass.
pub fn count_label_changes(utterances: &[Utterance]) -> usize {
    utterances
        .windows(2)
        .filter(|pair| {
            pair[0].assigned_speaker.unwrap_or(1) != pair[1].assigned_speaker.unwrap_or(1)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(start: f64, end: f64, text: &str) -> Utterance {
        Utterance::new(start, end, text)
    }

    fn alternating_dialogue(count: usize) -> Vec<Utterance> {
        let mut utterances = Vec::new();
        let mut t = 0.0;
        for i in 0..count {
            let (text, dur) = if i % 2 == 0 {
                ("What do you think?", 2.0)
            } else {
                ("Yes, I agree", 1.0)
            };
            utterances.push(utterance(t, t + dur, text));
            t += dur + 1.5;
        }
        utterances
    }

    #[test]
    fn test_empty_input_is_total() {
        let engine = AttributionEngine::default();
        let mut utterances: Vec<Utterance> = vec![];
        let result = engine.attribute(&mut utterances);

        assert_eq!(result.speaker_count, 1);
        assert_eq!(result.changes, 0);
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_single_utterance() {
        let engine = AttributionEngine::default();
        let mut utterances = vec![utterance(0.0, 2.0, "Hello")];
        let result = engine.attribute(&mut utterances);

        assert_eq!(result.speaker_count, 1);
        assert_eq!(utterances[0].assigned_speaker, Some(1));
        assert_eq!(result.spans.len(), 1);
    }

    #[test]
    fn test_alternating_dialogue_alternates_labels() {
        let engine = AttributionEngine::default();
        let mut utterances = alternating_dialogue(40);
        let result = engine.attribute(&mut utterances);

        assert_eq!(result.speaker_count, 2);
        for (i, u) in utterances.iter().enumerate() {
            let expected = if i % 2 == 0 { 1 } else { 2 };
            assert_eq!(u.assigned_speaker, Some(expected), "utterance {}", i);
        }
    }

    #[test]
    fn test_labels_stay_in_range() {
        let engine = AttributionEngine::default();
        let mut utterances = alternating_dialogue(37);
        let result = engine.attribute(&mut utterances);

        for u in &utterances {
            let speaker = u.assigned_speaker.expect("every utterance labeled");
            assert!(speaker >= 1 && speaker <= result.speaker_count);
        }
    }

    #[test]
    fn test_deterministic_relabeling() {
        let engine = AttributionEngine::default();
        let mut first = alternating_dialogue(25);
        let mut second = first.clone();

        engine.attribute_with_count(&mut first, 3);
        engine.attribute_with_count(&mut second, 3);

        let a: Vec<_> = first.iter().map(|u| u.assigned_speaker).collect();
        let b: Vec<_> = second.iter().map(|u| u.assigned_speaker).collect();
        assert_eq!(a, b);

        // Reprocessing already-labeled utterances is idempotent
        engine.attribute_with_count(&mut first, 3);
        let c: Vec<_> = first.iter().map(|u| u.assigned_speaker).collect();
        assert_eq!(a, c);
    }

    #[test]
    fn test_forced_count_clamped_to_data() {
        let engine = AttributionEngine::default();
        let mut utterances = vec![utterance(0.0, 2.0, "Hello")];
        let result = engine.attribute_with_count(&mut utterances, 5);

        assert_eq!(result.speaker_count, 1);
        assert_eq!(utterances[0].assigned_speaker, Some(1));
    }

    #[test]
    fn test_zero_max_speakers_still_labels_everything() {
        let engine = AttributionEngine::new(EngineConfig {
            max_speakers: 0,
            ..Default::default()
        });
        let mut utterances = alternating_dialogue(5);
        let result = engine.attribute(&mut utterances);

        assert_eq!(result.speaker_count, 1);
        assert!(utterances
            .iter()
            .all(|u| u.assigned_speaker == Some(1)));
    }

    #[test]
    fn test_forced_count_rotates_through_all_speakers() {
        let engine = AttributionEngine::default();
        let mut utterances = alternating_dialogue(12);
        let result = engine.attribute_with_count(&mut utterances, 3);

        assert_eq!(result.speaker_count, 3);
        let labels: Vec<u32> = utterances
            .iter()
            .map(|u| u.assigned_speaker.unwrap())
            .collect();
        // 1-based modulo rotation cycles 1,2,3,1,...
        assert_eq!(&labels[..6], &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_count_label_changes_reflects_current_labels() {
        let engine = AttributionEngine::default();
        let mut utterances = alternating_dialogue(6);
        let result = engine.attribute(&mut utterances);
        assert_eq!(count_label_changes(&utterances), result.changes);

        // Overriding labels after the pass changes the recount, not the
        // recorded pass result
        for u in utterances.iter_mut() {
            u.assigned_speaker = Some(1);
        }
        assert_eq!(count_label_changes(&utterances), 0);
        assert!(result.changes > 0);
    }

    #[test]
    fn test_spans_cover_all_utterances() {
        let engine = AttributionEngine::default();
        let mut utterances = alternating_dialogue(15);
        let result = engine.attribute(&mut utterances);

        let covered: usize = result.spans.iter().map(|s| s.utterance_count()).sum();
        assert_eq!(covered, utterances.len());
    }
}
