pub mod detect;
pub mod engine;
pub mod io;
pub mod models;
pub mod reconcile;

pub use detect::{
    detect_with_fallback, DetectionSource, DetectorError, ExternalDetector, HeuristicDetector,
    SpeakerDetector,
};
pub use engine::{AttributionEngine, AttributionResult, EngineConfig};
pub use io::{parse_transcription_file, parse_transcription_json, AnnotatedTranscript, HumanTranscript};
pub use models::{Detection, SpeakerSegment, SpeakerSpan, Utterance};
pub use reconcile::{reconcile_with_segments, ReconcileResult};
