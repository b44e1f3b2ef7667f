//! diarscribe-core - speaker-attributed transcript core library
//!
//! Value types shared by the diarization and ASR adapters, per-speaker
//! aggregation, manifest assembly and export.

pub mod aggregator;
pub mod audio;
pub mod config;
pub mod error;
pub mod exporter;
pub mod manifest;
pub mod types;

pub use aggregator::SpeakerAggregate;
pub use audio::{AudioError, AudioInfo};
pub use config::{FusionConfig, SpeakerHints, MAX_PRECISION};
pub use error::{FusionError, FusionWarning};
pub use exporter::{ExportError, Exporter};
pub use manifest::{AsrSummary, Manifest, ManifestBuilder};
pub use types::*;
