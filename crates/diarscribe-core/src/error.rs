//! Fusion error types

use thiserror::Error;

/// Errors that abort a fusion run
///
/// Every variant is raised before any output is produced, so a failed run
/// never leaves a partial manifest behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    /// Interval bounds are reversed, negative or not finite
    #[error("Invalid interval: start={start}, end={end}")]
    InvalidInterval { start: f64, end: f64 },

    /// Turn-store padding must be a finite, non-negative number of seconds
    #[error("Invalid end padding: {0}")]
    InvalidPadding(f64),

    /// Rounding precision above the number of digits an f64 can carry
    #[error("Invalid precision: {0} decimal places (max {})", crate::config::MAX_PRECISION)]
    InvalidPrecision(u32),

    /// A required field is absent from collaborator output
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Non-fatal conditions observed during a fusion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionWarning {
    /// Diarization produced no turns; every segment falls back to UNKNOWN
    NoTurns,
    /// Speech recognition produced no segments; the manifest has no segments
    NoSegments,
    /// Detected speaker count is outside the configured hints
    SpeakerCountOutsideHints { detected: usize },
}

impl std::fmt::Display for FusionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FusionWarning::NoTurns => write!(f, "no diarization turns"),
            FusionWarning::NoSegments => write!(f, "no ASR segments"),
            FusionWarning::SpeakerCountOutsideHints { detected } => {
                write!(f, "{} speakers detected, outside configured hints", detected)
            }
        }
    }
}
