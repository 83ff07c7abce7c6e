pub mod external;
pub mod heuristic;

pub use external::ExternalDetector;
pub use heuristic::HeuristicDetector;

use thiserror::Error;
use tracing::warn;

use crate::models::{Detection, Utterance};

/// Why a detector backend could not produce a result
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The backend is not usable in this environment (missing model file,
    /// missing collaborator output, ...). Callers may fall back to the
    /// heuristic detector.
    #[error("{backend} detector unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    #[error("failed to read detector input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse detector input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of per-time-range speaker labels
///
/// Every backend produces the same `Detection` shape so the overlap-based
/// reconciliation applies uniformly regardless of where the labels came
/// from.
pub trait SpeakerDetector {
    /// Short backend name for logs and output metadata
    fn name(&self) -> &'static str;

    /// Produce speaker segments for the given utterance sequence
    fn detect(&self, utterances: &[Utterance]) -> Result<Detection, DetectorError>;
}

/// Where the detection in a fallback run actually came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// The primary backend succeeded
    Primary,
    /// The primary backend was unavailable and the run degraded to the
    /// fallback
    Fallback,
}

/// Run `primary`, degrading to `fallback` when it reports itself
/// unavailable
///
/// Degradation is an explicit outcome, not a swallowed error: callers can
/// tell "ran the requested backend" from "fell back to the heuristic". A
/// hard failure of the fallback itself still propagates.
pub fn detect_with_fallback(
    primary: &dyn SpeakerDetector,
    fallback: &dyn SpeakerDetector,
    utterances: &[Utterance],
) -> Result<(Detection, DetectionSource), DetectorError> {
    match primary.detect(utterances) {
        Ok(detection) => Ok((detection, DetectionSource::Primary)),
        Err(err @ DetectorError::Unavailable { .. }) => {
            warn!(
                primary = primary.name(),
                fallback = fallback.name(),
                "primary detector unavailable, degrading: {err}"
            );
            let detection = fallback.detect(utterances)?;
            Ok((detection, DetectionSource::Fallback))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl SpeakerDetector for Unavailable {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        fn detect(&self, _utterances: &[Utterance]) -> Result<Detection, DetectorError> {
            Err(DetectorError::Unavailable {
                backend: "unavailable".to_string(),
                reason: "model not installed".to_string(),
            })
        }
    }

    #[test]
    fn test_fallback_reports_degradation() {
        let fallback = HeuristicDetector::default();
        let utterances = vec![Utterance::new(0.0, 2.0, "Hello")];

        let (detection, source) =
            detect_with_fallback(&Unavailable, &fallback, &utterances).unwrap();

        assert_eq!(source, DetectionSource::Fallback);
        assert_eq!(detection.speaker_count, 1);
    }

    #[test]
    fn test_primary_success_is_reported_as_primary() {
        let detector = HeuristicDetector::default();
        let utterances = vec![Utterance::new(0.0, 2.0, "Hello")];

        let (_, source) =
            detect_with_fallback(&detector, &detector, &utterances).unwrap();

        assert_eq!(source, DetectionSource::Primary);
    }
}
