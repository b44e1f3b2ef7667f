//! Audio header probing
//!
//! Only stream parameters are read here; decoding and resampling belong to
//! the diarization and ASR collaborators.

use std::fs::File;
use std::path::Path;

use hound::WavReader;
use serde::{Deserialize, Serialize};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::debug;

/// Audio probing errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Hound(#[from] hound::Error),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Stream parameters of an audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// File path
    pub path: String,
    /// Duration in seconds (0.0 when the container does not say)
    pub duration: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: u16,
}

/// Read stream parameters from an audio file
///
/// WAV headers are read with hound; every other container goes through the
/// symphonia probe.
pub fn probe<P: AsRef<Path>>(path: P) -> Result<AudioInfo, AudioError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AudioError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let info = if extension.as_deref() == Some("wav") {
        probe_wav(path)?
    } else {
        probe_symphonia(path)?
    };

    debug!(
        "Probed {}: {} Hz, {} ch, {:.3}s",
        info.path, info.sample_rate, info.channels, info.duration
    );
    Ok(info)
}

fn probe_wav(path: &Path) -> Result<AudioInfo, AudioError> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let duration = reader.duration() as f64 / spec.sample_rate as f64;

    Ok(AudioInfo {
        path: path.display().to_string(),
        duration,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

fn probe_symphonia(path: &Path) -> Result<AudioInfo, AudioError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AudioError::Decode(format!("Unable to probe format: {}", e)))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::Decode("No audio track found".to_string()))?;

    let codec_params = &track.codec_params;
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| AudioError::Decode("Sample rate unavailable".to_string()))?;
    let channels = codec_params.channels.map(|c| c.count() as u16).unwrap_or(1);
    let duration = codec_params
        .n_frames
        .map_or(0.0, |n_frames| n_frames as f64 / sample_rate as f64);

    Ok(AudioInfo {
        path: path.display().to_string(),
        duration,
        sample_rate,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};

    #[test]
    fn test_probe_wav_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..8000 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let info = probe(&path).unwrap();
        assert_eq!(info.sample_rate, 16000);
        assert_eq!(info.channels, 1);
        assert!((info.duration - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_probe_missing_file() {
        let result = probe("/definitely/not/here.wav");
        assert!(matches!(result, Err(AudioError::FileNotFound(_))));
    }
}
