//! Fusion configuration loading

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Args;
use diarscribe_core::FusionConfig;

/// Configuration flags shared by subcommands
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// JSON file with fusion settings
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Seconds added to the end of the last diarization turn
    #[arg(long)]
    pub end_pad: Option<f64>,

    /// Characters kept in the ASR text preview
    #[arg(long)]
    pub preview_chars: Option<usize>,

    /// Minimum expected number of speakers
    #[arg(long)]
    pub min_speakers: Option<u32>,

    /// Maximum expected number of speakers
    #[arg(long)]
    pub max_speakers: Option<u32>,
}

impl ConfigArgs {
    /// Load the config file (if any) and apply flag overrides
    pub fn resolve(&self) -> anyhow::Result<FusionConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => FusionConfig::default(),
        };

        if let Some(end_pad) = self.end_pad {
            config.end_pad = end_pad;
        }
        if let Some(preview_chars) = self.preview_chars {
            config.preview_chars = preview_chars;
        }
        if self.min_speakers.is_some() {
            config.speakers.min_speakers = self.min_speakers;
        }
        if self.max_speakers.is_some() {
            config.speakers.max_speakers = self.max_speakers;
        }

        config.validate().context("invalid fusion config")?;
        tracing::debug!("Fusion config: {:?}", config);
        Ok(config)
    }
}

fn load_config(path: &Path) -> anyhow::Result<FusionConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fusion.json");
        fs::write(&path, r#"{"end_pad": 0.3, "preview_chars": 50}"#).unwrap();

        let args = ConfigArgs {
            config: Some(path),
            end_pad: Some(0.5),
            max_speakers: Some(6),
            ..ConfigArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.end_pad, 0.5);
        assert_eq!(config.preview_chars, 50);
        assert_eq!(config.speakers.max_speakers, Some(6));
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigArgs::default().resolve().unwrap();
        assert_eq!(config, FusionConfig::default());
    }

    #[test]
    fn test_precision_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fusion.json");
        fs::write(&path, r#"{"precision": 400}"#).unwrap();

        let args = ConfigArgs {
            config: Some(path),
            ..ConfigArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("invalid fusion config"));
    }

    #[test]
    fn test_negative_end_pad_flag() {
        let args = ConfigArgs {
            end_pad: Some(-0.1),
            ..ConfigArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fusion.json");
        fs::write(&path, "not json").unwrap();

        let args = ConfigArgs {
            config: Some(path),
            ..ConfigArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
