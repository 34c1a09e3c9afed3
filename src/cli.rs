use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "YouTube video summarizer with caption fast path and Whisper fallback",
    version,
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// Summarize a local video file (mp4, mov, avi, mkv) instead of a URL
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Preferred caption language (default from config, else "en")
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip summarization, print the transcript only
    #[arg(long)]
    pub transcript_only: bool,

    /// Don't fall back to audio transcription if captions unavailable
    #[arg(long)]
    pub no_fallback: bool,

    /// Summarization model on the Hugging Face inference API
    #[arg(long)]
    pub model: Option<String>,

    /// Show acquisition method and metadata
    #[arg(short, long)]
    pub verbose: bool,
}
