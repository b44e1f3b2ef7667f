//! Diarization output adapters
//!
//! Turns arrive either as RTTM or as JSON speaker segments. JSON may be a
//! bare array or a diarization result object with a `segments` field.

use std::fs;
use std::path::Path;

use diarscribe_core::{FusionError, Turn};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DiarizationError;
use crate::rttm;

/// Speaker segment as reported by a diarization collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Speaker ID (e.g., "SPEAKER_00")
    #[serde(alias = "speaker")]
    pub speaker_id: String,
    /// Confidence score (0.0 - 1.0), when the collaborator provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SpeakerSegment {
    /// Validate and convert into a turn
    pub fn to_turn(&self) -> Result<Turn, FusionError> {
        if self.speaker_id.trim().is_empty() {
            return Err(FusionError::MissingField("speaker_id".to_string()));
        }
        Turn::new(self.speaker_id.as_str(), self.start, self.end)
    }
}

/// Diarization result document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationResult {
    /// Speaker segments
    pub segments: Vec<SpeakerSegment>,
    /// Number of unique speakers detected
    #[serde(default)]
    pub num_speakers: Option<usize>,
    /// Total audio duration
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpeakerSegmentsDocument {
    Bare(Vec<SpeakerSegment>),
    Result(DiarizationResult),
}

/// Parse JSON speaker segments into turns, in document order
pub fn parse_json_turns(content: &str) -> Result<Vec<Turn>, DiarizationError> {
    let segments = match serde_json::from_str::<SpeakerSegmentsDocument>(content)? {
        SpeakerSegmentsDocument::Bare(segments) => segments,
        SpeakerSegmentsDocument::Result(result) => result.segments,
    };

    let turns = segments
        .iter()
        .map(SpeakerSegment::to_turn)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(turns)
}

/// Load turns from an `.rttm` or `.json` file
pub fn load_turns<P: AsRef<Path>>(path: P) -> Result<Vec<Turn>, DiarizationError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DiarizationError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let turns = match extension.as_deref() {
        Some("rttm") => rttm::read_rttm(path)?,
        Some("json") => parse_json_turns(&fs::read_to_string(path)?)?,
        Some(ext) => return Err(DiarizationError::UnsupportedFormat(ext.to_string())),
        None => return Err(DiarizationError::UnsupportedFormat("unknown".to_string())),
    };

    info!("Loaded {} diarization turns from {}", turns.len(), path.display());
    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let turns = parse_json_turns(
            r#"[{"speaker": "S2", "start": 5.0, "end": 10.0},
                {"speaker_id": "S1", "start": 0.0, "end": 5.0, "confidence": 0.9}]"#,
        )
        .unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker.as_str(), "S2");
        assert_eq!(turns[1].interval.end(), 5.0);
    }

    #[test]
    fn test_parse_result_object() {
        let turns = parse_json_turns(
            r#"{"segments": [{"speaker_id": "Speaker1", "start": 0.5, "end": 1.5, "confidence": 0.9}],
                "num_speakers": 1, "duration": 1.5}"#,
        )
        .unwrap();
        assert_eq!(turns[0].speaker.as_str(), "Speaker1");
    }

    #[test]
    fn test_reversed_segment_is_invalid() {
        let err = parse_json_turns(r#"[{"speaker": "S1", "start": 3.0, "end": 1.0}]"#).unwrap_err();
        assert!(matches!(
            err,
            DiarizationError::Fusion(FusionError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_missing_speaker_is_invalid() {
        let err = parse_json_turns(r#"[{"start": 0.0, "end": 1.0}]"#).unwrap_err();
        assert!(matches!(err, DiarizationError::JsonError(_)));

        let err = parse_json_turns(r#"[{"speaker": " ", "start": 0.0, "end": 1.0}]"#).unwrap_err();
        assert!(matches!(
            err,
            DiarizationError::Fusion(FusionError::MissingField(_))
        ));
    }

    #[test]
    fn test_load_turns_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let rttm_path = dir.path().join("turns.rttm");
        fs::write(&rttm_path, "SPEAKER x 1 0.000 1.000 <NA> <NA> A <NA> <NA>\n").unwrap();
        assert_eq!(load_turns(&rttm_path).unwrap().len(), 1);

        let json_path = dir.path().join("turns.json");
        fs::write(&json_path, r#"[{"speaker": "A", "start": 0, "end": 1}]"#).unwrap();
        assert_eq!(load_turns(&json_path).unwrap().len(), 1);

        let csv_path = dir.path().join("turns.csv");
        fs::write(&csv_path, "").unwrap();
        assert!(matches!(
            load_turns(&csv_path),
            Err(DiarizationError::UnsupportedFormat(_))
        ));
    }
}
