//! ASR error types

use diarscribe_core::FusionError;
use thiserror::Error;

/// ASR-related errors
#[derive(Error, Debug)]
pub enum AsrError {
    /// File not found
    #[error("Transcript file not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Transcript data rejected by the fusion core
    #[error(transparent)]
    Fusion(#[from] FusionError),
}
