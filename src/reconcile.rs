//! Reconcile heuristic labels with an external diarizer's segments
//!
//! When an audio-based collaborator provides speaker-labeled time ranges,
//! those supersede the heuristic labels wherever they overlap an
//! utterance. Utterances no external range touches keep their heuristic
//! label unchanged.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::models::{SpeakerSegment, Utterance};

/// What the reconciliation pass did
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    /// Utterances whose label came from an external segment
    pub overridden: usize,
    /// Utterances that kept their heuristic label
    pub retained: usize,
    /// Distinct external speakers that actually claimed an utterance
    pub external_speaker_count: u32,
}

/// Override heuristic labels by maximum temporal overlap
///
/// For each utterance the external range with the greatest overlap wins;
/// ties go to the first-encountered range. External labels are numbered
/// 1-based in order of first appearance so downstream consumers see the
/// same integer label space either way.
pub fn reconcile_with_segments(
    utterances: &mut [Utterance],
    segments: &[SpeakerSegment],
) -> ReconcileResult {
    let mut label_indices: HashMap<&str, u32> = HashMap::new();
    let mut overridden = 0;
    let mut retained = 0;

    for utterance in utterances.iter_mut() {
        let best = segments
            .iter()
            .map(|segment| segment.overlap(utterance.start, utterance.end))
            .enumerate()
            // strictly-greater comparison keeps the first range on ties
            .fold(None::<(usize, f64)>, |best, (index, overlap)| match best {
                Some((_, best_overlap)) if overlap <= best_overlap => best,
                _ if overlap > 0.0 => Some((index, overlap)),
                _ => best,
            });

        match best {
            Some((index, _)) => {
                let next_index = label_indices.len() as u32 + 1;
                let speaker = *label_indices
                    .entry(segments[index].label.as_str())
                    .or_insert(next_index);
                utterance.assigned_speaker = Some(speaker);
                overridden += 1;
            }
            None => retained += 1,
        }
    }

    let result = ReconcileResult {
        overridden,
        retained,
        external_speaker_count: label_indices.len() as u32,
    };
    info!(
        overridden = result.overridden,
        retained = result.retained,
        "reconciled heuristic labels with external segments"
    );
    result
}

/// Cross-check the heuristic count estimate against an external one
///
/// Disagreement is expected and only logged; the external count wins for
/// labeling, the heuristic count remains useful as a sanity signal.
pub fn cross_check_counts(heuristic: u32, external: u32) {
    if heuristic != external {
        warn!(
            heuristic,
            external, "speaker count estimates disagree, using external"
        );
    }
}
