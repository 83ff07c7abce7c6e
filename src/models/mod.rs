pub mod diarization;
pub mod transcription;
pub mod utterance;

pub use diarization::*;
pub use transcription::*;
pub use utterance::*;
