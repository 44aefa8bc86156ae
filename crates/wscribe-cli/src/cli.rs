use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wscribe_core::core::{formats::ExportFormat, View};

#[derive(Parser, Debug)]
#[command(name = "wscribe-cli")]
#[command(author, version, about = "Validate, regroup, edit and export timed transcripts")]
pub struct Cli {
    /// Settings directory (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a transcript and check its timing
    Validate {
        /// JSON, SRT or VTT input
        file: PathBuf,
    },

    /// Export a transcript in another format
    Convert {
        file: PathBuf,

        /// json, srt, vtt or plaintext
        #[arg(long)]
        to: Option<ExportFormat>,

        /// sub or transcript
        #[arg(long)]
        view: Option<View>,

        /// Segments per transcript paragraph
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the transcript view as JSON
    Group {
        file: PathBuf,

        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Apply a JSON script of edit commands, then export
    Edit {
        file: PathBuf,

        /// JSON array of edit commands
        #[arg(long)]
        script: PathBuf,

        #[arg(long)]
        to: Option<ExportFormat>,

        #[arg(long)]
        view: Option<View>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective settings as JSON
    Settings {
        /// Delete the stored settings file and fall back to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Print session metadata as JSON
    Info {
        file: PathBuf,

        #[arg(long)]
        view: Option<View>,

        /// Media file the transcript belongs to
        #[arg(long)]
        media: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "wscribe-cli",
            "--verbose",
            "convert",
            "talk.json",
            "--to",
            "VTT",
            "--view",
            "transcript",
            "--chunk-size",
            "4",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Convert {
                file,
                to,
                view,
                chunk_size,
                output,
            } => {
                assert_eq!(file, PathBuf::from("talk.json"));
                assert_eq!(to, Some(ExportFormat::Vtt));
                assert_eq!(view, Some(View::Transcript));
                assert_eq!(chunk_size, Some(4));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["wscribe-cli", "validate", "a.srt", "--config", "/tmp/cfg"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cfg")));
    }

    #[test]
    fn test_parse_settings_reset() {
        let cli = Cli::try_parse_from(["wscribe-cli", "settings", "--reset"]).unwrap();
        assert!(matches!(cli.command, Commands::Settings { reset: true }));

        let cli = Cli::try_parse_from(["wscribe-cli", "settings"]).unwrap();
        assert!(matches!(cli.command, Commands::Settings { reset: false }));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["wscribe-cli", "convert", "a.json", "--to", "docx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_edit_requires_script() {
        assert!(Cli::try_parse_from(["wscribe-cli", "edit", "a.json"]).is_err());
    }
}
