//! diarscribe command-line tool
//!
//! Fuses a diarization timeline with an ASR transcript into a
//! speaker-attributed manifest.

mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diarscribe", version, about = "Speaker-attributed transcripts")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split transcript segments along speaker turns and write the manifest
    Fuse(commands::fuse::FuseArgs),
    /// List normalized diarization turns, optionally writing them as RTTM
    Turns(commands::turns::TurnsArgs),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so a manifest printed to stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fuse(args) => commands::fuse::run(args),
        Command::Turns(args) => commands::turns::run(args),
    }
}
