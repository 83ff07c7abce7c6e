//! Speaker-count estimation from conversational statistics
//!
//! A single pass over a prefix sample of the utterance list computes
//! aggregate signal ratios, combines them into a weighted conversation
//! score, and maps the score to a speaker count through fixed bands.
//! Strong individual signals can override a low aggregate score.

use super::lexicon;
use super::EngineConfig;
use crate::models::Utterance;

// Signal weights for the conversation score
const PAUSE_WEIGHT: f64 = 2.0;
const RESPONSE_WEIGHT: f64 = 3.0;
const QUESTION_WEIGHT: f64 = 2.5;
const ADDRESS_WEIGHT: f64 = 4.0;
const ASYMMETRY_WEIGHT: f64 = 1.5;
const LENGTH_STD_WEIGHT: f64 = 1.0;

// Score bands for the count mapping. Two-party back-and-forth with dense
// question/response/address signals lands around 8-9, so the three-party
// band sits above that.
const THREE_SPEAKER_SCORE: f64 = 10.0;
const TWO_SPEAKER_SCORE: f64 = 0.8;
const WEAK_TWO_SPEAKER_SCORE: f64 = 0.4;

// A conversation longer than this is assumed to involve at least two people
const LONG_CONVERSATION_UTTERANCES: usize = 30;

// Raw-count overrides: strong single-signal evidence forces at least two
// speakers regardless of the aggregate score
const RESPONSE_OVERRIDE_COUNT: usize = 3;
const QUESTION_OVERRIDE_COUNT: usize = 2;
const ADDRESS_OVERRIDE_COUNT: usize = 2;
const PAUSE_OVERRIDE_COUNT: usize = 5;

// Length-asymmetry thresholds (short answer after a long statement)
const SHORT_ANSWER_CHARS: usize = 30;
const LONG_STATEMENT_CHARS: usize = 60;

/// Aggregate conversational statistics over the sampled prefix
#[derive(Debug, Clone, Default)]
pub struct ConversationStats {
    /// Number of utterances sampled
    pub sampled: usize,
    /// Adjacent pairs separated by a pause above the pause threshold
    pub pause_changes: usize,
    /// Pairs whose current utterance contains a response word
    pub response_hits: usize,
    /// Pairs whose previous utterance reads as a question
    pub question_hits: usize,
    /// Pairs where either side contains a second-person address
    pub address_hits: usize,
    /// Short-answer-after-long-statement pairs
    pub length_asymmetries: usize,
    /// Text-length standard deviation normalized by the mean length
    pub length_std_normalized: f64,
    /// Weighted conversation score
    pub score: f64,
}

/// Collect signal statistics over up to `config.sample_limit` utterances
///
/// The prefix sample is a performance bound; conversation structure is
/// assumed stationary enough for a prefix to be representative.
pub fn collect_stats(utterances: &[Utterance], config: &EngineConfig) -> ConversationStats {
    let sample = &utterances[..utterances.len().min(config.sample_limit)];
    let mut stats = ConversationStats {
        sampled: sample.len(),
        ..Default::default()
    };

    if sample.len() < 2 {
        return stats;
    }

    for pair in sample.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if current.gap_since(previous) > config.pause_gap_seconds {
            stats.pause_changes += 1;
        }
        if lexicon::is_response(&current.text) {
            stats.response_hits += 1;
        }
        if lexicon::is_question(&previous.text) {
            stats.question_hits += 1;
        }
        if lexicon::is_direct_address(&current.text) || lexicon::is_direct_address(&previous.text)
        {
            stats.address_hits += 1;
        }
        let current_len = current.text.chars().count();
        let previous_len = previous.text.chars().count();
        if current_len < SHORT_ANSWER_CHARS && previous_len > LONG_STATEMENT_CHARS {
            stats.length_asymmetries += 1;
        }
    }

    stats.length_std_normalized = normalized_length_std(sample);

    let n = sample.len() as f64;
    stats.score = (stats.pause_changes as f64 / n) * PAUSE_WEIGHT
        + (stats.response_hits as f64 / n) * RESPONSE_WEIGHT
        + (stats.question_hits as f64 / n) * QUESTION_WEIGHT
        + (stats.address_hits as f64 / n) * ADDRESS_WEIGHT
        + (stats.length_asymmetries as f64 / n) * ASYMMETRY_WEIGHT
        + stats.length_std_normalized * LENGTH_STD_WEIGHT;

    stats
}

/// Estimate how many distinct speakers participated
///
/// Always returns a value in `[config.min_speakers, config.max_speakers]`;
/// fewer than 3 utterances is too short to infer multiplicity and yields 1.
pub fn estimate_speaker_count(utterances: &[Utterance], config: &EngineConfig) -> u32 {
    // A zeroed or inverted bound still yields a usable answer
    let min = config.min_speakers.max(1);
    let max = config.max_speakers.max(min);

    if utterances.len() < 3 {
        return min;
    }

    let stats = collect_stats(utterances, config);
    let mut count = map_score(stats.score, utterances.len());

    // Strong individual evidence overrides a low aggregate score
    if stats.response_hits > RESPONSE_OVERRIDE_COUNT
        || stats.question_hits > QUESTION_OVERRIDE_COUNT
        || stats.address_hits > ADDRESS_OVERRIDE_COUNT
        || stats.pause_changes > PAUSE_OVERRIDE_COUNT
    {
        count = count.max(2);
    }

    count.clamp(min, max)
}

/// Banded mapping from conversation score to speaker count
fn map_score(score: f64, total_utterances: usize) -> u32 {
    if score > THREE_SPEAKER_SCORE {
        3
    } else if score > TWO_SPEAKER_SCORE {
        2
    } else if score > WEAK_TWO_SPEAKER_SCORE || total_utterances > LONG_CONVERSATION_UTTERANCES {
        2
    } else {
        1
    }
}

/// Standard deviation of utterance text lengths, normalized by the mean
fn normalized_length_std(sample: &[Utterance]) -> f64 {
    let lengths: Vec<f64> = sample
        .iter()
        .map(|u| u.text.chars().count() as f64)
        .collect();
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}
