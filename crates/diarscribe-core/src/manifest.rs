//! Speaker-attributed transcript manifest

use serde::{Serialize, Serializer};

use crate::config::FusionConfig;
use crate::types::{round_to, AsrMetadata, FusedSegment, Speaker, SpeakerSummary};

/// ASR run details recorded in the manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsrSummary {
    pub model_used: String,
    pub language: Option<String>,
    pub full_text_preview: String,
}

/// Final artifact of a fusion run
///
/// Serializes to the `input` / `sample_rate` / `asr` / `speakers` / `segments`
/// document. Segment times are written at the run's precision; the in-memory
/// segments keep their exact bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub input: String,
    pub sample_rate: u32,
    pub asr: AsrSummary,
    pub speakers: Vec<SpeakerSummary>,
    pub segments: Vec<FusedSegment>,
    precision: u32,
}

impl Manifest {
    pub fn precision(&self) -> u32 {
        self.precision
    }
}

#[derive(Serialize)]
struct ManifestDocument<'a> {
    input: &'a str,
    sample_rate: u32,
    asr: &'a AsrSummary,
    speakers: &'a [SpeakerSummary],
    segments: Vec<SegmentRecord<'a>>,
}

#[derive(Serialize)]
struct SegmentRecord<'a> {
    speaker: &'a Speaker,
    start: f64,
    end: f64,
    duration: f64,
    text: &'a str,
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ManifestDocument {
            input: &self.input,
            sample_rate: self.sample_rate,
            asr: &self.asr,
            speakers: &self.speakers,
            segments: self
                .segments
                .iter()
                .map(|segment| SegmentRecord {
                    speaker: &segment.speaker,
                    start: round_to(segment.start(), self.precision),
                    end: round_to(segment.end(), self.precision),
                    duration: segment.duration,
                    text: &segment.text,
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

/// Assembles a [`Manifest`] from already computed parts
pub struct ManifestBuilder<'a> {
    config: &'a FusionConfig,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(config: &'a FusionConfig) -> Self {
        Self { config }
    }

    /// Combine run inputs and fusion output into one manifest
    ///
    /// `speakers` must already be sorted by id and `segments` must be in
    /// production order; both are stored as given.
    pub fn build(
        &self,
        input: impl Into<String>,
        sample_rate: u32,
        asr: &AsrMetadata,
        speakers: Vec<SpeakerSummary>,
        segments: Vec<FusedSegment>,
    ) -> Manifest {
        Manifest {
            input: input.into(),
            sample_rate,
            asr: AsrSummary {
                model_used: asr.model_used.clone(),
                language: asr.language.clone(),
                full_text_preview: preview(&asr.full_text, self.config.preview_chars),
            },
            speakers,
            segments,
            precision: self.config.precision,
        }
    }
}

/// First `max_chars` characters of `text`
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
