//! RTTM reading and writing
//!
//! Only `SPEAKER` records are used:
//! `SPEAKER <file> <chan> <start> <dur> <NA> <NA> <speaker> <NA> <NA>`

use std::fs;
use std::path::Path;

use diarscribe_core::Turn;
use tracing::debug;

use crate::error::DiarizationError;

const SPEAKER_RECORD: &str = "SPEAKER";

/// Parse RTTM text into turns, in file order
pub fn parse_rttm(content: &str) -> Result<Vec<Turn>, DiarizationError> {
    let mut turns = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields[0] != SPEAKER_RECORD {
            debug!("Skipping RTTM line {}: {} record", line_no, fields[0]);
            continue;
        }
        if fields.len() < 8 {
            return Err(DiarizationError::Rttm {
                line: line_no,
                reason: format!("expected at least 8 fields, found {}", fields.len()),
            });
        }

        let start = parse_seconds(fields[3], "start", line_no)?;
        let duration = parse_seconds(fields[4], "duration", line_no)?;
        let turn = Turn::new(fields[7], start, start + duration).map_err(|e| {
            DiarizationError::Rttm {
                line: line_no,
                reason: e.to_string(),
            }
        })?;
        turns.push(turn);
    }

    Ok(turns)
}

/// Read turns from an RTTM file
pub fn read_rttm<P: AsRef<Path>>(path: P) -> Result<Vec<Turn>, DiarizationError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DiarizationError::FileNotFound(path.display().to_string()));
    }
    parse_rttm(&fs::read_to_string(path)?)
}

/// Format turns as RTTM `SPEAKER` records
pub fn format_rttm<'a, I>(turns: I, file_id: &str) -> String
where
    I: IntoIterator<Item = &'a Turn>,
{
    turns
        .into_iter()
        .map(|turn| {
            format!(
                "{} {} 1 {:.3} {:.3} <NA> <NA> {} <NA> <NA>\n",
                SPEAKER_RECORD,
                file_id,
                turn.interval.start(),
                turn.interval.duration(),
                turn.speaker
            )
        })
        .collect()
}

/// Write turns to an RTTM file, creating parent directories
pub fn write_rttm<'a, I, P>(turns: I, file_id: &str, output_path: P) -> Result<(), DiarizationError>
where
    I: IntoIterator<Item = &'a Turn>,
    P: AsRef<Path>,
{
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, format_rttm(turns, file_id))?;
    Ok(())
}

fn parse_seconds(field: &str, name: &str, line: usize) -> Result<f64, DiarizationError> {
    field.parse::<f64>().map_err(|e| DiarizationError::Rttm {
        line,
        reason: format!("invalid {} '{}': {}", name, field, e),
    })
}
