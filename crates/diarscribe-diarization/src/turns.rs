//! Sorted, end-padded store of diarization turns

use std::collections::BTreeSet;

use diarscribe_core::{FusionConfig, FusionError, SpeakerId, Turn};
use tracing::{debug, warn};

/// Diarization turns in ascending start order
///
/// Built once per fusion run. The last turn's end is extended by the
/// configured padding so speech trailing past the final diarized turn is
/// still attributed to that speaker.
#[derive(Debug, Clone, Default)]
pub struct TurnStore {
    turns: Vec<Turn>,
    disjoint: bool,
}

impl TurnStore {
    /// Sort turns by start (stable) and pad the last one by `end_pad` seconds
    pub fn build(mut turns: Vec<Turn>, end_pad: f64) -> Result<Self, FusionError> {
        if !end_pad.is_finite() || end_pad < 0.0 {
            return Err(FusionError::InvalidPadding(end_pad));
        }

        turns.sort_by(|a, b| a.interval.start().total_cmp(&b.interval.start()));

        if let Some(last) = turns.last_mut() {
            last.interval = last.interval.padded_end(end_pad)?;
        }

        let overlaps = turns
            .windows(2)
            .filter(|pair| pair[1].interval.start() < pair[0].interval.end())
            .count();
        if overlaps > 0 {
            warn!(
                "{} diarization turns overlap their predecessor; expected an exclusive track",
                overlaps
            );
        }

        for turn in &turns {
            debug!(
                "{}: {:.2}s → {:.2}s (dur={:.2}s)",
                turn.speaker,
                turn.interval.start(),
                turn.interval.end(),
                turn.interval.duration()
            );
        }

        Ok(Self {
            turns,
            disjoint: overlaps == 0,
        })
    }

    /// Build with the padding from a fusion config
    ///
    /// The whole config is validated first so a bad precision is caught
    /// before any segment is fused.
    pub fn with_config(turns: Vec<Turn>, config: &FusionConfig) -> Result<Self, FusionError> {
        config.validate()?;
        Self::build(turns, config.end_pad)
    }

    /// Build from raw `(speaker, start, end)` triples
    pub fn from_triples<I, S>(triples: I, end_pad: f64) -> Result<Self, FusionError>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<SpeakerId>,
    {
        let turns = triples
            .into_iter()
            .map(|(speaker, start, end)| Turn::new(speaker, start, end))
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(turns, end_pad)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn as_slice(&self) -> &[Turn] {
        &self.turns
    }

    /// Whether no turn overlaps its predecessor
    pub fn is_disjoint(&self) -> bool {
        self.disjoint
    }

    /// Distinct speaker ids, sorted
    pub fn speakers(&self) -> Vec<&SpeakerId> {
        self.turns
            .iter()
            .map(|turn| &turn.speaker)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a TurnStore {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
