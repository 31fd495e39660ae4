//! CLI module for Kalima.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{format_elapsed, Output};

use crate::catalog::{CATEGORIES, LAST_DAY};
use clap::{Args, Parser, Subcommand};

/// Kalima - Arabic phrase curriculum builder
///
/// Writes phrase listings, reads them aloud with text-to-speech, and picks
/// a YouTube lesson for every day and category of the curriculum.
#[derive(Parser, Debug)]
#[command(name = "kalima")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "KALIMA_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by the generation commands.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Generate only text files (no audio)
    #[arg(short, long)]
    pub text_only: bool,

    /// Voice to use for audio generation (alloy, echo, fable, onyx, nova, shimmer)
    #[arg(long)]
    pub voice: Option<String>,

    /// Language to generate audio for (ar, en, both)
    #[arg(short, long, default_value = "both")]
    pub language: String,

    /// Output directory (defaults to general.output_dir)
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate text and audio files for the numbered days
    Days {
        /// Day number to generate. If not specified, generates all days.
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=LAST_DAY as i64))]
        day: Option<u32>,

        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate text and audio files for the supplementary categories
    Supplementary {
        /// Category to generate. If not specified, generates all categories.
        #[arg(short = 'g', long, value_parser = clap::builder::PossibleValuesParser::new(CATEGORIES))]
        category: Option<String>,

        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Find YouTube lessons for days and categories
    Videos {
        #[command(subcommand)]
        action: VideoAction,
    },

    /// List catalog entries
    List,

    /// Check API keys and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum VideoAction {
    /// Search for a video for every entry that has none yet
    Resolve {
        /// Only this day
        #[arg(short, long, conflicts_with = "category", value_parser = clap::value_parser!(u32).range(1..=LAST_DAY as i64))]
        day: Option<u32>,

        /// Only this category
        #[arg(short = 'g', long, value_parser = clap::builder::PossibleValuesParser::new(CATEGORIES))]
        category: Option<String>,

        /// Only one collection (days, supplementary)
        #[arg(long, conflicts_with_all = ["day", "category"])]
        only: Option<String>,
    },

    /// Show the recorded videos
    List,

    /// Clear an entry so the next resolve searches for it again
    Reset {
        /// Entry key (e.g. day7, education)
        key: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_days_flags() {
        let cli = Cli::parse_from(["kalima", "days", "--day", "3", "--text-only", "-l", "ar"]);
        match cli.command {
            Commands::Days { day, args } => {
                assert_eq!(day, Some(3));
                assert!(args.text_only);
                assert_eq!(args.language, "ar");
                assert!(args.voice.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_day_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["kalima", "days", "--day", "41"]).is_err());
        assert!(Cli::try_parse_from(["kalima", "days", "--day", "0"]).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["kalima", "supplementary", "--category", "cooking"]).is_err());
        assert!(Cli::try_parse_from(["kalima", "supplementary", "--category", "daily_life"]).is_ok());
    }

    #[test]
    fn test_resolve_day_and_category_conflict() {
        assert!(Cli::try_parse_from([
            "kalima", "videos", "resolve", "--day", "1", "--category", "hobbies"
        ])
        .is_err());
    }
}
