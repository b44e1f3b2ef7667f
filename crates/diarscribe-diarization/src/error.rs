//! Diarization error types

use diarscribe_core::FusionError;
use thiserror::Error;

/// Diarization-related errors
#[derive(Error, Debug)]
pub enum DiarizationError {
    /// File not found
    #[error("Diarization file not found: {0}")]
    FileNotFound(String),

    /// File extension is neither RTTM nor JSON
    #[error("Unsupported diarization format: {0}")]
    UnsupportedFormat(String),

    /// RTTM record could not be parsed
    #[error("RTTM line {line}: {reason}")]
    Rttm { line: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Turn data rejected by the fusion core
    #[error(transparent)]
    Fusion(#[from] FusionError),
}
