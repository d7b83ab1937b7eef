//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "drift")]
#[command(about = "A quiet space for falling asleep", long_about = None)]
pub struct Args {
    /// Directory for the journal store and log (defaults to ~/.drift)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Fixed seed for the noise buffer
    #[arg(long, value_name = "SEED", global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pink noise player: SPACE toggles, Q quits
    Noise,

    /// 4-7-8 breathing guide: SPACE starts or stops, N toggles noise
    Breathe,

    /// Sheep counter: SPACE counts, N toggles noise
    Sheep,

    /// Read and write journal entries
    #[command(subcommand)]
    Journal(JournalCommand),

    /// Tell a slow, boring bedtime story
    Story {
        /// Rainy Forest, Cosmic Drift, Quiet Library, Ocean Depths or Snowy Cabin
        #[arg(long, value_name = "THEME", default_value = "Rainy Forest")]
        theme: String,
    },

    /// Print sleep tips
    Tips,

    /// Render the noise engine to a WAV file without a device
    Render {
        /// Length of the recording
        #[arg(long, value_name = "SECONDS", default_value = "10")]
        seconds: f64,

        /// Output file
        #[arg(long, value_name = "FILE", default_value = "drift.wav")]
        out: PathBuf,

        /// Sample rate of the recording
        #[arg(
            long,
            value_name = "HZ",
            default_value = "44100",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        sample_rate: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// List entries, newest first
    List,

    /// Show one entry
    Show { id: String },

    /// Create an entry, or edit one with --id
    Write {
        #[arg(long)]
        id: Option<String>,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        body: String,

        /// Ask for a soothing reply before saving
        #[arg(long)]
        soothe: bool,
    },

    /// Delete an entry
    Delete { id: String },

    /// Ask for a soothing reply to an existing entry
    Soothe { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_journal_write() {
        let args = Args::parse_from([
            "drift", "journal", "write", "--title", "Work", "--body", "tomorrow", "--soothe",
        ]);
        match args.command {
            Command::Journal(JournalCommand::Write {
                id, title, soothe, ..
            }) => {
                assert_eq!(id, None);
                assert_eq!(title, "Work");
                assert!(soothe);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from(["drift", "render", "--seconds", "2", "--seed", "9"]);
        assert_eq!(args.seed, Some(9));
        assert!(matches!(args.command, Command::Render { seconds, .. } if seconds == 2.0));
    }

    #[test]
    fn test_render_rejects_zero_sample_rate() {
        assert!(Args::try_parse_from(["drift", "render", "--sample-rate", "0"]).is_err());

        let args = Args::try_parse_from(["drift", "render", "--sample-rate", "8000"]).unwrap();
        assert!(matches!(args.command, Command::Render { sample_rate: 8000, .. }));
    }
}
