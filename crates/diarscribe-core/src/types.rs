//! Shared value types for diarization/ASR fusion

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::config::MAX_PRECISION;
use crate::error::FusionError;

/// Label used when speech cannot be matched to any diarized turn
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// Round a value to a fixed number of decimal places
///
/// Precision is capped at [`MAX_PRECISION`]; beyond that the value is
/// already as exact as an f64 gets.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}

/// Opaque speaker identifier produced by diarization (e.g. "SPEAKER_00")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerId(String);

impl SpeakerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpeakerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SpeakerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Speaker attribution of a fused segment
///
/// Serialized as a plain string; the fallback bucket is written as `"UNKNOWN"`.
/// Known speakers sort before the fallback bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Speaker {
    /// Speaker identified by diarization
    Known(SpeakerId),
    /// No diarized turn overlapped the speech
    Unknown,
}

impl Speaker {
    pub fn as_str(&self) -> &str {
        match self {
            Speaker::Known(id) => id.as_str(),
            Speaker::Unknown => UNKNOWN_SPEAKER,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Speaker::Unknown)
    }

    pub fn id(&self) -> Option<&SpeakerId> {
        match self {
            Speaker::Known(id) => Some(id),
            Speaker::Unknown => None,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Speaker {
    fn from(label: String) -> Self {
        if label == UNKNOWN_SPEAKER {
            Speaker::Unknown
        } else {
            Speaker::Known(SpeakerId(label))
        }
    }
}

impl From<SpeakerId> for Speaker {
    fn from(id: SpeakerId) -> Self {
        Speaker::Known(id)
    }
}

impl Serialize for Speaker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Half-open time range in seconds
///
/// Constructed only through [`Interval::new`], which rejects reversed,
/// negative and non-finite bounds. Zero-length intervals are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Result<Self, FusionError> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < start {
            return Err(FusionError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this interval ends at or before `other` starts
    pub fn precedes(&self, other: &Interval) -> bool {
        self.end <= other.start
    }

    /// Whether this interval starts at or after `other` ends
    pub fn follows(&self, other: &Interval) -> bool {
        self.start >= other.end
    }

    /// Strictly positive intersection with `other`
    ///
    /// Intervals that merely touch at one instant do not intersect.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(Interval { start, end })
    }

    /// Copy with the end moved later by `pad` seconds
    pub fn padded_end(&self, pad: f64) -> Result<Interval, FusionError> {
        if !pad.is_finite() || pad < 0.0 {
            return Err(FusionError::InvalidPadding(pad));
        }
        Interval::new(self.start, self.end + pad)
    }
}

/// One contiguous span attributed to a single speaker by diarization
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub speaker: SpeakerId,
    pub interval: Interval,
}

impl Turn {
    pub fn new(speaker: impl Into<SpeakerId>, start: f64, end: f64) -> Result<Self, FusionError> {
        Ok(Self {
            speaker: speaker.into(),
            interval: Interval::new(start, end)?,
        })
    }
}

/// One span of recognized speech
#[derive(Debug, Clone, PartialEq)]
pub struct AsrSegment {
    pub interval: Interval,
    /// Whitespace-trimmed text
    pub text: String,
}

impl AsrSegment {
    pub fn new(start: f64, end: f64, text: &str) -> Result<Self, FusionError> {
        Ok(Self {
            interval: Interval::new(start, end)?,
            text: text.trim().to_string(),
        })
    }
}

/// Metadata reported by the speech recognition run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsrMetadata {
    /// Model identifier (e.g. "large-v3")
    pub model_used: String,
    /// Detected or forced language code
    pub language: Option<String>,
    /// Full transcript text
    pub full_text: String,
}

/// Speaker-attributed piece of an ASR segment
#[derive(Debug, Clone, PartialEq)]
pub struct FusedSegment {
    pub speaker: Speaker,
    pub interval: Interval,
    /// Interval length rounded to the run's precision
    pub duration: f64,
    /// Full text of the source ASR segment
    pub text: String,
}

impl FusedSegment {
    pub fn new(speaker: Speaker, interval: Interval, text: &str, precision: u32) -> Self {
        Self {
            speaker,
            interval,
            duration: round_to(interval.duration(), precision),
            text: text.to_string(),
        }
    }

    pub fn start(&self) -> f64 {
        self.interval.start()
    }

    pub fn end(&self) -> f64 {
        self.interval.end()
    }
}

/// Total speaking time of one diarized speaker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerSummary {
    #[serde(rename = "id")]
    pub speaker: SpeakerId,
    #[serde(rename = "total_sec")]
    pub total_seconds: f64,
}
