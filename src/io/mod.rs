pub mod input;
pub mod output;

pub use input::{parse_transcription_file, parse_transcription_json};
pub use output::{AnnotatedTranscript, HumanTranscript, TranscriptMetadata};
