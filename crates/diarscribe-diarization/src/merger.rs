//! Split ASR segments along diarization turns

use diarscribe_core::{AsrSegment, FusedSegment, Speaker};

use crate::turns::TurnStore;

/// Split one ASR segment at every speaker turn it overlaps
///
/// Pieces come back in turn order and carry the full segment text. Turns
/// that only touch the segment at a single instant produce nothing, so the
/// result may be empty.
pub fn split_segment(segment: &AsrSegment, turns: &TurnStore, precision: u32) -> Vec<FusedSegment> {
    let span = &segment.interval;

    // Sorted disjoint turns have non-decreasing ends, so everything that ends
    // before the segment is a prefix.
    let first = if turns.is_disjoint() {
        turns
            .as_slice()
            .partition_point(|turn| turn.interval.precedes(span))
    } else {
        0
    };

    let mut pieces = Vec::new();
    for turn in &turns.as_slice()[first..] {
        if turn.interval.precedes(span) {
            continue;
        }
        if turn.interval.follows(span) {
            break;
        }
        if let Some(overlap) = span.intersection(&turn.interval) {
            pieces.push(FusedSegment::new(
                Speaker::Known(turn.speaker.clone()),
                overlap,
                &segment.text,
                precision,
            ));
        }
    }
    pieces
}

/// Guarantee at least one fused piece per ASR segment
///
/// An empty split becomes a single UNKNOWN piece spanning the whole segment.
pub fn apply_fallback(
    segment: &AsrSegment,
    pieces: Vec<FusedSegment>,
    precision: u32,
) -> Vec<FusedSegment> {
    if pieces.is_empty() {
        vec![FusedSegment::new(
            Speaker::Unknown,
            segment.interval,
            &segment.text,
            precision,
        )]
    } else {
        pieces
    }
}

/// Split a segment and apply the fallback policy
pub fn fuse_segment(segment: &AsrSegment, turns: &TurnStore, precision: u32) -> Vec<FusedSegment> {
    apply_fallback(segment, split_segment(segment, turns, precision), precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(triples: &[(&str, f64, f64)], end_pad: f64) -> TurnStore {
        TurnStore::from_triples(triples.iter().copied(), end_pad).unwrap()
    }

    fn asr(start: f64, end: f64, text: &str) -> AsrSegment {
        AsrSegment::new(start, end, text).unwrap()
    }

    fn bounds(pieces: &[FusedSegment]) -> Vec<(String, f64, f64, f64)> {
        pieces
            .iter()
            .map(|p| (p.speaker.to_string(), p.start(), p.end(), p.duration))
            .collect()
    }

    #[test]
    fn test_segment_spanning_two_turns() {
        let turns = store(&[("S1", 0.0, 5.0), ("S2", 5.0, 10.0)], 0.0);
        let pieces = split_segment(&asr(3.0, 7.0, "hello world"), &turns, 3);

        assert_eq!(
            bounds(&pieces),
            vec![
                ("S1".to_string(), 3.0, 5.0, 2.0),
                ("S2".to_string(), 5.0, 7.0, 2.0),
            ]
        );
        assert!(pieces.iter().all(|p| p.text == "hello world"));
    }

    #[test]
    fn test_no_overlap_falls_back_to_unknown() {
        let turns = store(&[("S1", 0.0, 2.0)], 0.0);
        let segment = asr(5.0, 6.0, "unreachable");

        assert!(split_segment(&segment, &turns, 3).is_empty());
        let pieces = fuse_segment(&segment, &turns, 3);
        assert_eq!(bounds(&pieces), vec![("UNKNOWN".to_string(), 5.0, 6.0, 1.0)]);
        assert_eq!(pieces[0].text, "unreachable");
    }

    #[test]
    fn test_touching_boundary_is_not_overlap() {
        let turns = store(&[("S1", 0.0, 2.0), ("S2", 4.0, 6.0)], 0.0);
        let pieces = fuse_segment(&asr(2.0, 4.0, "gap"), &turns, 3);
        assert_eq!(bounds(&pieces), vec![("UNKNOWN".to_string(), 2.0, 4.0, 2.0)]);
    }

    #[test]
    fn test_zero_length_turn_is_ignored() {
        let turns = store(&[("S1", 0.0, 1.0), ("S2", 1.5, 1.5), ("S3", 2.0, 3.0)], 0.0);
        let pieces = split_segment(&asr(0.5, 2.5, "x"), &turns, 3);
        let speakers: Vec<_> = pieces.iter().map(|p| p.speaker.to_string()).collect();
        assert_eq!(speakers, vec!["S1", "S3"]);
    }

    #[test]
    fn test_zero_length_segment_falls_back() {
        let turns = store(&[("S1", 0.0, 5.0)], 0.0);
        let pieces = fuse_segment(&asr(2.0, 2.0, "blip"), &turns, 3);
        assert_eq!(bounds(&pieces), vec![("UNKNOWN".to_string(), 2.0, 2.0, 0.0)]);
    }

    #[test]
    fn test_end_padding_catches_trailing_speech() {
        let segment = asr(5.0, 5.3, "tail");

        let unpadded = store(&[("S1", 0.0, 3.0), ("S2", 3.0, 5.0)], 0.0);
        assert_eq!(fuse_segment(&segment, &unpadded, 3)[0].speaker, Speaker::Unknown);

        let padded = store(&[("S1", 0.0, 3.0), ("S2", 3.0, 5.0)], 0.5);
        let pieces = fuse_segment(&segment, &padded, 3);
        assert_eq!(bounds(&pieces), vec![("S2".to_string(), 5.0, 5.3, 0.3)]);
    }

    #[test]
    fn test_segment_inside_one_turn() {
        let turns = store(&[("S1", 0.0, 10.0), ("S2", 10.0, 20.0)], 0.0);
        let pieces = split_segment(&asr(2.5, 4.0, "inside"), &turns, 3);
        assert_eq!(bounds(&pieces), vec![("S1".to_string(), 2.5, 4.0, 1.5)]);
    }

    #[test]
    fn test_gaps_between_turns_are_not_attributed() {
        let turns = store(&[("S1", 0.0, 1.0), ("S2", 2.0, 3.0)], 0.0);
        let pieces = split_segment(&asr(0.5, 2.5, "split"), &turns, 3);
        assert_eq!(
            bounds(&pieces),
            vec![
                ("S1".to_string(), 0.5, 1.0, 0.5),
                ("S2".to_string(), 2.0, 2.5, 0.5),
            ]
        );
    }

    #[test]
    fn test_overlapping_turns_fall_back_to_linear_scan() {
        // S1 ends after S2, so ends are not monotone.
        let turns = store(&[("S1", 0.0, 10.0), ("S2", 1.0, 2.0), ("S3", 3.0, 4.0)], 0.0);
        let pieces = split_segment(&asr(5.0, 6.0, "late"), &turns, 3);
        assert_eq!(bounds(&pieces), vec![("S1".to_string(), 5.0, 6.0, 1.0)]);
    }
}
