//! Fusion configuration

use serde::{Deserialize, Serialize};

use crate::error::FusionError;

/// Default padding added to the last diarization turn (seconds)
pub const DEFAULT_END_PAD: f64 = 0.12;

/// Default number of decimal places for persisted numbers
pub const DEFAULT_PRECISION: u32 = 3;

/// Largest precision an f64 can round to without overflowing the scale factor
pub const MAX_PRECISION: u32 = 15;

/// Default character budget for the ASR text preview
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Speaker-count hints handed to the diarization collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeakerHints {
    /// Minimum number of speakers (None = auto-detect)
    pub min_speakers: Option<u32>,
    /// Maximum number of speakers (None = auto-detect)
    pub max_speakers: Option<u32>,
}

impl SpeakerHints {
    /// Whether a detected speaker count is consistent with the hints
    pub fn admits(&self, detected: usize) -> bool {
        let detected = detected as u64;
        let above_min = self.min_speakers.map_or(true, |min| detected >= min as u64);
        let below_max = self.max_speakers.map_or(true, |max| detected <= max as u64);
        above_min && below_max
    }
}

/// Configuration for one fusion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Seconds added to the end of the last turn after sorting
    pub end_pad: f64,
    /// Decimal places used for durations and persisted times
    pub precision: u32,
    /// Maximum characters kept in the ASR text preview
    pub preview_chars: usize,
    /// Speaker-count hints
    pub speakers: SpeakerHints,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            end_pad: DEFAULT_END_PAD,
            precision: DEFAULT_PRECISION,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            speakers: SpeakerHints::default(),
        }
    }
}

impl FusionConfig {
    /// Reject settings that would corrupt persisted numbers
    pub fn validate(&self) -> Result<(), FusionError> {
        if !self.end_pad.is_finite() || self.end_pad < 0.0 {
            return Err(FusionError::InvalidPadding(self.end_pad));
        }
        if self.precision > MAX_PRECISION {
            return Err(FusionError::InvalidPrecision(self.precision));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FusionConfig::default();
        assert_eq!(config.end_pad, 0.12);
        assert_eq!(config.precision, 3);
        assert_eq!(config.preview_chars, 200);
        assert_eq!(config.speakers, SpeakerHints::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: FusionConfig =
            serde_json::from_str(r#"{"end_pad": 0.5, "speakers": {"max_speakers": 6}}"#).unwrap();
        assert_eq!(config.end_pad, 0.5);
        assert_eq!(config.precision, 3);
        assert_eq!(config.speakers.max_speakers, Some(6));
        assert_eq!(config.speakers.min_speakers, None);
    }

    #[test]
    fn test_validate() {
        assert!(FusionConfig::default().validate().is_ok());

        let config: FusionConfig = serde_json::from_str(r#"{"precision": 400}"#).unwrap();
        assert_eq!(config.validate(), Err(FusionError::InvalidPrecision(400)));

        let config = FusionConfig {
            precision: MAX_PRECISION,
            ..FusionConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = FusionConfig {
            end_pad: f64::NAN,
            ..FusionConfig::default()
        };
        assert!(matches!(config.validate(), Err(FusionError::InvalidPadding(_))));
    }

    #[test]
    fn test_speaker_hints() {
        let hints = SpeakerHints {
            min_speakers: Some(4),
            max_speakers: Some(6),
        };
        assert!(!hints.admits(3));
        assert!(hints.admits(4));
        assert!(hints.admits(6));
        assert!(!hints.admits(7));
        assert!(SpeakerHints::default().admits(0));
    }
}
