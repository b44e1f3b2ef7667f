//! Whisper-style transcript adapter
//!
//! Accepts the JSON produced by a Whisper wrapper:
//! `{"text", "segments": [{"start", "end", "text"}], "language", "model_used"}`.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use diarscribe_core::{AsrMetadata, AsrSegment, FusionError};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AsrError;

/// Raw transcript document
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperTranscript {
    /// Full transcript text
    #[serde(default)]
    pub text: Option<String>,
    /// Timed segments
    #[serde(default)]
    pub segments: Vec<WhisperSegment>,
    /// Detected language
    #[serde(default)]
    pub language: Option<String>,
    /// Model identifier
    #[serde(default)]
    pub model_used: Option<String>,
}

/// Raw timed segment
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperSegment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub text: Option<String>,
}

/// Normalized transcript ready for fusion
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub segments: Vec<AsrSegment>,
    pub metadata: AsrMetadata,
}

impl WhisperTranscript {
    /// Validate and normalize into segments plus run metadata
    pub fn into_transcript(self) -> Result<Transcript, AsrError> {
        let model_used = self
            .model_used
            .filter(|model| !model.trim().is_empty())
            .ok_or_else(|| FusionError::MissingField("model_used".to_string()))?;

        let segments = self
            .segments
            .iter()
            .map(|segment| {
                let text = clean_whisper_text(segment.text.as_deref().unwrap_or_default());
                AsrSegment::new(segment.start, segment.end, &text)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let full_text = match self.text {
            Some(text) => clean_whisper_text(&text),
            None => {
                debug!("Transcript has no full text; joining segment texts");
                segments
                    .iter()
                    .map(|segment| segment.text.as_str())
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        };

        let language = self
            .language
            .map(|language| language.trim().to_string())
            .filter(|language| !language.is_empty());

        Ok(Transcript {
            segments,
            metadata: AsrMetadata {
                model_used,
                language,
                full_text,
            },
        })
    }
}

/// Parse and normalize transcript JSON
pub fn parse_transcript(content: &str) -> Result<Transcript, AsrError> {
    serde_json::from_str::<WhisperTranscript>(content)?.into_transcript()
}

/// Load and normalize a transcript JSON file
pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<Transcript, AsrError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AsrError::FileNotFound(path.display().to_string()));
    }

    let transcript = parse_transcript(&fs::read_to_string(path)?)?;
    info!(
        "Loaded transcript {}: {} segments, model {}, language {}",
        path.display(),
        transcript.segments.len(),
        transcript.metadata.model_used,
        transcript.metadata.language.as_deref().unwrap_or("unknown")
    );
    Ok(transcript)
}

/// Clean Whisper output text by removing special tokens
pub fn clean_whisper_text(text: &str) -> String {
    static SPECIAL_TOKEN: OnceLock<Regex> = OnceLock::new();
    let re = SPECIAL_TOKEN
        .get_or_init(|| Regex::new(r"<\|[^|]+\|>").expect("special token pattern is valid"));
    re.replace_all(text, "").trim().to_string()
}
