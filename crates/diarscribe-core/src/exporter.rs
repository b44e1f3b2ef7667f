//! Manifest and per-speaker text export

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::aggregator::SpeakerAggregate;
use crate::manifest::Manifest;
use crate::types::Speaker;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes fusion results to disk
pub struct Exporter;

impl Exporter {
    /// Serialize a manifest to a JSON string
    pub fn manifest_json(manifest: &Manifest, pretty: bool) -> Result<String, ExportError> {
        let json = if pretty {
            serde_json::to_string_pretty(manifest)?
        } else {
            serde_json::to_string(manifest)?
        };
        Ok(json)
    }

    /// Write the manifest as JSON
    pub fn to_json<P: AsRef<Path>>(
        manifest: &Manifest,
        output_path: P,
        pretty: bool,
    ) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(output_path, Self::manifest_json(manifest, pretty)?)?;
        info!("Manifest written to {}", output_path.display());
        Ok(())
    }

    /// Write one `<speaker>.txt` file per speaker, UNKNOWN included
    ///
    /// Speakers whose names map to the same file (`spk:1` and `spk_1`, or a
    /// diarized `UNKNOWN` and the fallback bucket) get `_2`, `_3`, ...
    /// suffixes in speaker order. Returns the written paths in speaker order.
    pub fn to_speaker_texts<P: AsRef<Path>>(
        aggregate: &SpeakerAggregate,
        output_dir: P,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let mut taken = HashSet::with_capacity(aggregate.len());
        let mut written = Vec::with_capacity(aggregate.len());
        for (speaker, text) in aggregate.texts() {
            let stem = Self::speaker_file_stem(speaker);
            let mut file_name = format!("{}.txt", stem);
            let mut suffix = 2;
            while !taken.insert(file_name.clone()) {
                file_name = format!("{}_{}.txt", stem, suffix);
                suffix += 1;
            }
            if suffix > 2 {
                warn!(
                    "Speaker {} collides with another speaker's file name; writing {}",
                    speaker, file_name
                );
            }

            let path = output_dir.join(file_name);
            fs::write(&path, format!("{}\n", text))?;
            written.push(path);
        }

        info!(
            "Wrote {} speaker text files to {}",
            written.len(),
            output_dir.display()
        );
        Ok(written)
    }

    /// File name used for a speaker's text file
    pub fn speaker_file_name(speaker: &Speaker) -> String {
        format!("{}.txt", Self::speaker_file_stem(speaker))
    }

    fn speaker_file_stem(speaker: &Speaker) -> String {
        speaker.as_str().replace(':', "_")
    }
}
