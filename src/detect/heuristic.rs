use super::{DetectorError, SpeakerDetector};
use crate::engine::{AttributionEngine, EngineConfig};
use crate::models::{Detection, SpeakerSegment, Utterance};

/// Text-and-timing detector backend built on the attribution engine
///
/// Always available; this is the fallback every other backend degrades to.
#[derive(Debug, Clone, Default)]
pub struct HeuristicDetector {
    engine: AttributionEngine,
}

impl HeuristicDetector {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: AttributionEngine::new(config),
        }
    }
}

impl SpeakerDetector for HeuristicDetector {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn detect(&self, utterances: &[Utterance]) -> Result<Detection, DetectorError> {
        // Work on a copy: detectors produce segments, they do not annotate
        // the caller's utterances
        let mut labeled = utterances.to_vec();
        let result = self.engine.attribute(&mut labeled);

        let segments = result
            .spans
            .into_iter()
            .map(|span| SpeakerSegment {
                start: span.start,
                end: span.end,
                label: format!("speaker_{}", span.speaker),
            })
            .collect();

        Ok(Detection {
            speaker_count: result.speaker_count,
            segments,
        })
    }
}
