//! Speaker diarization side of diarscribe
//!
//! Loads diarization turns, keeps them in a sorted turn store and splits ASR
//! segments along speaker boundaries.

pub mod error;
pub mod merger;
pub mod pipeline;
pub mod rttm;
pub mod source;
pub mod turns;

pub use error::DiarizationError;
pub use merger::{apply_fallback, fuse_segment, split_segment};
pub use pipeline::{fuse, FusionResult};
pub use source::{load_turns, DiarizationResult, SpeakerSegment};
pub use turns::TurnStore;
