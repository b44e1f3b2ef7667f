//! Whole-transcript fusion

use diarscribe_core::{
    AsrMetadata, AsrSegment, FusedSegment, FusionConfig, FusionWarning, Manifest,
    ManifestBuilder, SpeakerAggregate,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, warn};

use crate::merger::fuse_segment;
use crate::turns::TurnStore;

/// Output of one fusion run
#[derive(Debug, Clone)]
pub struct FusionResult {
    /// Fused segments in production order
    pub segments: Vec<FusedSegment>,
    /// Per-speaker text and duration
    pub aggregate: SpeakerAggregate,
    /// Non-fatal conditions observed during the run
    pub warnings: Vec<FusionWarning>,
    precision: u32,
}

impl FusionResult {
    /// Assemble the manifest for this run
    pub fn manifest(
        &self,
        config: &FusionConfig,
        input: impl Into<String>,
        sample_rate: u32,
        asr: &AsrMetadata,
    ) -> Manifest {
        ManifestBuilder::new(config).build(
            input,
            sample_rate,
            asr,
            self.aggregate.summaries(self.precision),
            self.segments.clone(),
        )
    }
}

/// Attribute every ASR segment to the speakers whose turns it overlaps
///
/// Each segment yields at least one fused piece. Segments are processed
/// independently; the aggregate is reduced serially afterwards so the result
/// does not depend on how the split was scheduled.
pub fn fuse(turns: &TurnStore, segments: &[AsrSegment], config: &FusionConfig) -> FusionResult {
    let precision = config.precision;
    let mut warnings = Vec::new();

    if turns.is_empty() {
        warn!("No diarization turns; all speech will be attributed to UNKNOWN");
        warnings.push(FusionWarning::NoTurns);
    } else {
        let detected = turns.speakers().len();
        if !config.speakers.admits(detected) {
            warn!(
                "Detected {} speakers, outside hints {:?}",
                detected, config.speakers
            );
            warnings.push(FusionWarning::SpeakerCountOutsideHints { detected });
        }
    }
    if segments.is_empty() {
        warn!("No ASR segments; manifest will contain no segments");
        warnings.push(FusionWarning::NoSegments);
    }

    #[cfg(feature = "parallel")]
    let per_segment: Vec<Vec<FusedSegment>> = segments
        .par_iter()
        .map(|segment| fuse_segment(segment, turns, precision))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_segment: Vec<Vec<FusedSegment>> = segments
        .iter()
        .map(|segment| fuse_segment(segment, turns, precision))
        .collect();

    let fused: Vec<FusedSegment> = per_segment.into_iter().flatten().collect();
    let aggregate = SpeakerAggregate::accumulate(&fused);

    info!(
        "Fusion completed: {} ASR segments → {} fused segments, {} speakers, {:.3}s unattributed",
        segments.len(),
        fused.len(),
        aggregate.summaries(precision).len(),
        aggregate.unattributed_seconds(precision)
    );

    FusionResult {
        segments: fused,
        aggregate,
        warnings,
        precision,
    }
}
