//! Per-speaker aggregation of fused segments

use std::collections::BTreeMap;

use crate::types::{round_to, FusedSegment, Speaker, SpeakerSummary};

/// Compensated (Neumaier) running sum
///
/// Keeps the low-order bits lost by each addition so long transcripts do not
/// drift away from the exact total.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

#[derive(Debug, Clone, Default)]
struct SpeakerEntry {
    fragments: Vec<String>,
    seconds: CompensatedSum,
}

/// Per-speaker text and speaking time, built in one pass over fused segments
///
/// Entries exist only for speakers that received at least one fused segment.
/// The map is ordered by speaker, with the UNKNOWN bucket last.
#[derive(Debug, Clone, Default)]
pub struct SpeakerAggregate {
    entries: BTreeMap<Speaker, SpeakerEntry>,
}

impl SpeakerAggregate {
    /// Accumulate fused segments in the order they were produced
    pub fn accumulate<'a, I>(fused: I) -> Self
    where
        I: IntoIterator<Item = &'a FusedSegment>,
    {
        let mut entries: BTreeMap<Speaker, SpeakerEntry> = BTreeMap::new();
        for segment in fused {
            let entry = entries.entry(segment.speaker.clone()).or_default();
            entry.fragments.push(segment.text.clone());
            entry.seconds.add(segment.duration);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Speakers in map order
    pub fn speakers(&self) -> impl Iterator<Item = &Speaker> {
        self.entries.keys()
    }

    /// Joined text for one speaker
    pub fn text(&self, speaker: &Speaker) -> Option<String> {
        self.entries.get(speaker).map(|entry| join_fragments(&entry.fragments))
    }

    /// Joined text for every speaker
    pub fn texts(&self) -> BTreeMap<&Speaker, String> {
        self.entries
            .iter()
            .map(|(speaker, entry)| (speaker, join_fragments(&entry.fragments)))
            .collect()
    }

    /// Unrounded total seconds for one speaker
    pub fn seconds(&self, speaker: &Speaker) -> Option<f64> {
        self.entries.get(speaker).map(|entry| entry.seconds.value())
    }

    /// Total seconds for every speaker, rounded at read-out
    pub fn durations(&self, precision: u32) -> BTreeMap<&Speaker, f64> {
        self.entries
            .iter()
            .map(|(speaker, entry)| (speaker, round_to(entry.seconds.value(), precision)))
            .collect()
    }

    /// Summaries of diarized speakers, sorted by speaker id
    ///
    /// Time attributed to the UNKNOWN bucket is not a speaker and is reported
    /// by [`SpeakerAggregate::unattributed_seconds`] instead.
    pub fn summaries(&self, precision: u32) -> Vec<SpeakerSummary> {
        self.entries
            .iter()
            .filter_map(|(speaker, entry)| {
                speaker.id().map(|id| SpeakerSummary {
                    speaker: id.clone(),
                    total_seconds: round_to(entry.seconds.value(), precision),
                })
            })
            .collect()
    }

    /// Seconds of speech no diarized turn could claim
    pub fn unattributed_seconds(&self, precision: u32) -> f64 {
        self.seconds(&Speaker::Unknown)
            .map_or(0.0, |seconds| round_to(seconds, precision))
    }
}

fn join_fragments(fragments: &[String]) -> String {
    fragments.join(" ").trim().to_string()
}
