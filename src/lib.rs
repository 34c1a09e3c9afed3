pub mod cache;
pub mod config;
pub mod error;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod stt;
pub mod summarize;
pub mod vtt;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use error::{Error, Result};

/// How the transcript was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranscriptSource {
    Caption,
    Whisper,
}

impl std::fmt::Display for TranscriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptSource::Caption => write!(f, "caption"),
            TranscriptSource::Whisper => write!(f, "whisper"),
        }
    }
}

/// Final artifact of one request: full transcript plus its summary
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub language: String,
    pub source: TranscriptSource,
    pub transcript: String,
    pub summary: Option<String>,
}

static BARE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap());

static URL_ID_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"youtube\.com/watch\?.*v=([a-zA-Z0-9_-]{11})",
        r"youtu\.be/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Extract the canonical video ID from the URL forms YouTube hands out,
/// or from a bare 11-character ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if BARE_ID_RE.is_match(input) {
        return Some(input.to_string());
    }

    URL_ID_RES
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| caps[1].to_string())
}
