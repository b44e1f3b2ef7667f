//! `fuse` command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use diarscribe_asr::load_transcript;
use diarscribe_core::{audio, Exporter};
use diarscribe_diarization::{fuse, load_turns, rttm, TurnStore};
use tracing::info;

use crate::config::ConfigArgs;

#[derive(Debug, Args)]
pub struct FuseArgs {
    /// Audio file the timelines were produced from (recorded as the manifest input)
    #[arg(long)]
    pub input: PathBuf,

    /// Diarization turns (.rttm or .json)
    #[arg(long)]
    pub turns: PathBuf,

    /// ASR transcript JSON
    #[arg(long)]
    pub transcript: PathBuf,

    /// Sample rate to record instead of probing the input audio
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Manifest output path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for per-speaker text files
    #[arg(long)]
    pub speaker_text_dir: Option<PathBuf>,

    /// Write the padded, sorted turns as RTTM
    #[arg(long)]
    pub rttm_out: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: FuseArgs) -> anyhow::Result<()> {
    let config = args.config.resolve()?;

    let sample_rate = match args.sample_rate {
        Some(rate) => rate,
        None => {
            audio::probe(&args.input)
                .with_context(|| format!("failed to probe audio {}", args.input.display()))?
                .sample_rate
        }
    };

    let turns = load_turns(&args.turns)
        .with_context(|| format!("failed to load diarization {}", args.turns.display()))?;
    let turns = TurnStore::with_config(turns, &config).context("invalid diarization turns")?;

    let transcript = load_transcript(&args.transcript)
        .with_context(|| format!("failed to load transcript {}", args.transcript.display()))?;

    let result = fuse(&turns, &transcript.segments, &config);
    let input = args.input.display().to_string();
    let manifest = result.manifest(&config, input.as_str(), sample_rate, &transcript.metadata);

    if let Some(path) = &args.rttm_out {
        let file_id = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        rttm::write_rttm(&turns, file_id, path)
            .with_context(|| format!("failed to write RTTM {}", path.display()))?;
        info!("RTTM written to {}", path.display());
    }

    match &args.output {
        Some(path) => Exporter::to_json(&manifest, path, !args.compact)
            .with_context(|| format!("failed to write manifest {}", path.display()))?,
        None => println!("{}", Exporter::manifest_json(&manifest, !args.compact)?),
    }

    if let Some(dir) = &args.speaker_text_dir {
        Exporter::to_speaker_texts(&result.aggregate, dir)
            .with_context(|| format!("failed to write speaker texts to {}", dir.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let turns_path = dir.path().join("turns.rttm");
        fs::write(
            &turns_path,
            "SPEAKER a 1 5.000 5.000 <NA> <NA> S2 <NA> <NA>\n\
             SPEAKER a 1 0.000 5.000 <NA> <NA> S1 <NA> <NA>\n",
        )
        .unwrap();
        let transcript_path = dir.path().join("asr.json");
        fs::write(
            &transcript_path,
            r#"{"text": "hello world", "language": "en", "model_used": "large-v3",
                "segments": [{"start": 3.0, "end": 7.0, "text": " hello world"}]}"#,
        )
        .unwrap();

        let args = FuseArgs {
            input: PathBuf::from("inputs/a.wav"),
            turns: turns_path,
            transcript: transcript_path,
            sample_rate: Some(16000),
            output: Some(dir.path().join("out/manifest.json")),
            speaker_text_dir: Some(dir.path().join("out/speakers")),
            rttm_out: Some(dir.path().join("out/a_exclusive.rttm")),
            compact: false,
            config: ConfigArgs::default(),
        };
        run(args).unwrap();

        let manifest: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("out/manifest.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["input"], "inputs/a.wav");
        assert_eq!(manifest["sample_rate"], 16000);
        assert_eq!(manifest["segments"].as_array().unwrap().len(), 2);
        assert_eq!(manifest["speakers"][0]["id"], "S1");
        assert_eq!(manifest["speakers"][1]["total_sec"], 2.0);

        let s2 = fs::read_to_string(dir.path().join("out/speakers/S2.txt")).unwrap();
        assert_eq!(s2, "hello world\n");

        let rttm = fs::read_to_string(dir.path().join("out/a_exclusive.rttm")).unwrap();
        assert!(rttm.starts_with("SPEAKER a 1 0.000 5.000 <NA> <NA> S1"));
        assert!(rttm.contains("SPEAKER a 1 5.000 5.120 <NA> <NA> S2"));
    }

    #[test]
    fn test_run_rejects_reversed_turn() {
        let dir = tempfile::tempdir().unwrap();
        let turns_path = dir.path().join("turns.json");
        fs::write(&turns_path, r#"[{"speaker": "S1", "start": 4.0, "end": 1.0}]"#).unwrap();
        let transcript_path = dir.path().join("asr.json");
        fs::write(&transcript_path, r#"{"model_used": "base", "segments": []}"#).unwrap();
        let output = dir.path().join("manifest.json");

        let args = FuseArgs {
            input: PathBuf::from("a.wav"),
            turns: turns_path,
            transcript: transcript_path,
            sample_rate: Some(16000),
            output: Some(output.clone()),
            speaker_text_dir: None,
            rttm_out: None,
            compact: true,
            config: ConfigArgs::default(),
        };
        assert!(run(args).is_err());
        assert!(!output.exists());
    }
}
