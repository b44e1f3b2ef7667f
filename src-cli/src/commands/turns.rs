//! `turns` command

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use diarscribe_diarization::{load_turns, rttm, TurnStore};

use crate::config::ConfigArgs;

#[derive(Debug, Args)]
pub struct TurnsArgs {
    /// Diarization turns (.rttm or .json)
    #[arg(long)]
    pub turns: PathBuf,

    /// Write the padded, sorted turns as RTTM
    #[arg(long)]
    pub rttm_out: Option<PathBuf>,

    /// RTTM file id column
    #[arg(long, default_value = "audio")]
    pub file_id: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: TurnsArgs) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let turns = load_turns(&args.turns)
        .with_context(|| format!("failed to load diarization {}", args.turns.display()))?;
    let store = TurnStore::with_config(turns, &config).context("invalid diarization turns")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_listing(&store, &mut out)?;

    if let Some(path) = &args.rttm_out {
        rttm::write_rttm(&store, &args.file_id, path)
            .with_context(|| format!("failed to write RTTM {}", path.display()))?;
    }
    Ok(())
}

fn write_listing<W: Write>(store: &TurnStore, out: &mut W) -> std::io::Result<()> {
    for turn in store {
        writeln!(
            out,
            "{}: {:.2}s → {:.2}s (dur={:.2}s)",
            turn.speaker,
            turn.interval.start(),
            turn.interval.end(),
            turn.interval.duration()
        )?;
    }
    writeln!(
        out,
        "{} turns, {} speakers",
        store.len(),
        store.speakers().len()
    )
}
