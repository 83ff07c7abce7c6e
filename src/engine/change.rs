//! Pairwise speaker-change detection
//!
//! For each adjacent utterance pair the detector sums independently
//! weighted evidence into a probability capped at 1.0, then thresholds it.
//! Every tiered signal applies only its largest matching tier; the one
//! deliberate exception is the flat multi-speaker run bonus, which stacks
//! on top of the run-length tier.

use super::lexicon;
use super::EngineConfig;

// Time-gap tiers (seconds -> probability contribution)
const GAP_TIERS: &[(f64, f64)] = &[(1.5, 0.8), (1.0, 0.6), (0.5, 0.4), (0.3, 0.2)];

const STRONG_RESPONSE_BONUS: f64 = 0.7;
const MEDIUM_RESPONSE_BONUS: f64 = 0.5;
const QUESTION_BONUS: f64 = 0.6;
const ADDRESS_BONUS: f64 = 0.5;
const DISCOURSE_BONUS: f64 = 0.3;

// Run-length pressure tiers (utterances since last change -> contribution)
const RUN_TIERS: &[(usize, f64)] = &[(8, 0.4), (5, 0.3), (3, 0.2)];
// Flat bonus when multiple speakers are expected and the run has dragged on
const MULTI_SPEAKER_RUN_LENGTH: usize = 4;
const MULTI_SPEAKER_RUN_BONUS: f64 = 0.2;

/// Everything the detector needs to know about one adjacent pair
#[derive(Debug, Clone, Copy)]
pub struct ChangeContext<'a> {
    /// Text of the current utterance
    pub current: &'a str,
    /// Text of the previous utterance
    pub previous: &'a str,
    /// Silence between the previous utterance and this one, in seconds
    pub time_gap: f64,
    /// Utterances labeled since the last detected change
    pub utterances_since_change: usize,
    /// Fixed speaker count for this pass
    pub speaker_count: u32,
}

/// Bounded probability that the speaker changed at this pair
pub fn change_probability(ctx: &ChangeContext) -> f64 {
    let mut probability = 0.0;

    // Largest applicable gap tier only - a step function, not stacked bands
    let gap = if ctx.time_gap.is_finite() { ctx.time_gap.max(0.0) } else { 0.0 };
    for &(threshold, bonus) in GAP_TIERS {
        if gap > threshold {
            probability += bonus;
            break;
        }
    }

    // Response words, higher tier wins
    if lexicon::is_strong_response(ctx.current) {
        probability += STRONG_RESPONSE_BONUS;
    } else if lexicon::is_medium_response(ctx.current) {
        probability += MEDIUM_RESPONSE_BONUS;
    }

    if lexicon::is_question(ctx.previous) {
        probability += QUESTION_BONUS;
    }

    probability += length_asymmetry_bonus(ctx.current, ctx.previous);

    if lexicon::is_direct_address(ctx.previous) {
        probability += ADDRESS_BONUS;
    }

    if lexicon::has_discourse_marker(ctx.current) {
        probability += DISCOURSE_BONUS;
    }

    for &(threshold, bonus) in RUN_TIERS {
        if ctx.utterances_since_change > threshold {
            probability += bonus;
            break;
        }
    }
    if ctx.speaker_count >= 2 && ctx.utterances_since_change > MULTI_SPEAKER_RUN_LENGTH {
        probability += MULTI_SPEAKER_RUN_BONUS;
    }

    probability.clamp(0.0, 1.0)
}

/// Decide whether the current speaker should rotate at this pair
///
/// With `speaker_count <= 1` rotation is meaningless and the answer is
/// always no. The run-length guard refuses a change when no utterance has
/// elapsed since the last one, so a single decision point can never rotate
/// twice.
pub fn should_change_speaker(ctx: &ChangeContext, config: &EngineConfig) -> bool {
    if ctx.speaker_count <= 1 {
        return false;
    }
    if ctx.utterances_since_change < 1 {
        return false;
    }

    let probability = change_probability(ctx);
    if probability > config.fast_change_threshold {
        return true;
    }
    probability >= config.change_threshold
}

/// First matching length-asymmetry tier
fn length_asymmetry_bonus(current: &str, previous: &str) -> f64 {
    let current_len = current.chars().count();
    let previous_len = previous.chars().count();

    if current_len < 50 && previous_len > 100 {
        0.6
    } else if current_len < 30 && previous_len > 60 {
        0.4
    } else if current_len.abs_diff(previous_len) > 80 {
        0.3
    } else {
        0.0
    }
}

/// 1-based modulo rotation to the next speaker index
pub fn rotate_speaker(current: u32, speaker_count: u32) -> u32 {
    (current % speaker_count.max(1)) + 1
}
