//! Speech recognition side of diarscribe
//!
//! Reads transcripts produced by a Whisper-style recognizer and normalizes
//! them into timed segments plus run metadata.

pub mod error;
pub mod transcript;

pub use error::AsrError;
pub use transcript::{
    clean_whisper_text, load_transcript, parse_transcript, Transcript, WhisperSegment,
    WhisperTranscript,
};
