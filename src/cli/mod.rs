//! CLI module for tubestudy.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tubestudy - study material from YouTube videos
///
/// Generates multiple-choice questions, PDF notes, and narrated audio
/// summaries from a video's captions.
#[derive(Parser, Debug)]
#[command(name = "tubestudy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate multiple-choice questions as JSON
    Questions {
        /// YouTube URL or video ID
        link: String,

        /// Number of questions (default from config)
        #[arg(short, long)]
        num: Option<usize>,

        /// Difficulty level, e.g. easy, medium, hard (default from config)
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Generate a PDF of notes
    Notes {
        /// YouTube URL or video ID
        link: String,

        /// Output PDF path
        #[arg(short, long, default_value = "notes.pdf")]
        output: String,

        /// Also print the article text
        #[arg(long)]
        text: bool,

        /// Transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Generate a narrated MP3 summary
    Audio {
        /// YouTube URL or video ID
        link: String,

        /// Output MP3 path
        #[arg(short, long, default_value = "summary_audio.mp3")]
        output: String,

        /// Also print the narration script
        #[arg(long)]
        script: bool,

        /// Transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print the trimmed transcript
    Transcript {
        /// YouTube URL or video ID
        link: String,

        /// Transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Show how a transcript would be chunked
    Chunks {
        /// YouTube URL or video ID
        link: String,

        /// Transcript language code
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Check API keys, credentials, and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
