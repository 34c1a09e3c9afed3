use std::path::Path;

use log::info;

use crate::cache::MemoCache;
use crate::error::{Error, Result};
use crate::media;
use crate::stt::SpeechToText;
use crate::summarize::{self, Summarizer};
use crate::youtube::{self, Acquired, VideoTool};
use crate::{Report, TranscriptSource, extract_video_id};

#[derive(Clone)]
struct CachedTranscript {
    text: String,
    source: TranscriptSource,
    title: Option<String>,
}

/// One summarization pipeline: acquisition, transcription and summarization
/// wired together over swappable capabilities, with process-lifetime
/// memoization of transcripts and summaries.
pub struct Pipeline<T, S, Z> {
    tool: T,
    stt: S,
    summarizer: Z,
    lang: String,
    max_chunk_chars: usize,
    fallback: bool,
    transcripts: MemoCache<String, CachedTranscript>,
    summaries: MemoCache<String, String>,
}

impl<T: VideoTool, S: SpeechToText, Z: Summarizer> Pipeline<T, S, Z> {
    pub fn new(
        tool: T,
        stt: S,
        summarizer: Z,
        lang: impl Into<String>,
        max_chunk_chars: usize,
    ) -> Self {
        Self {
            tool,
            stt,
            summarizer,
            lang: lang.into(),
            max_chunk_chars,
            fallback: true,
            transcripts: MemoCache::new(),
            summaries: MemoCache::new(),
        }
    }

    /// Disable the audio fallback: a caption miss fails the request.
    pub fn without_fallback(mut self) -> Self {
        self.fallback = false;
        self
    }

    /// Run the full request for a YouTube URL or bare video ID.
    pub async fn run_url(&self, input: &str) -> Result<Report> {
        let mut report = self.fetch_transcript_url(input).await?;
        report.summary = Some(self.summarize_memoized(&report.transcript).await?);
        Ok(report)
    }

    /// Run the full request for a local video file.
    pub async fn run_file(&self, path: &Path) -> Result<Report> {
        let mut report = self.fetch_transcript_file(path).await?;
        report.summary = Some(self.summarize_memoized(&report.transcript).await?);
        Ok(report)
    }

    /// Acquire the transcript for a URL without summarizing.
    pub async fn fetch_transcript_url(&self, input: &str) -> Result<Report> {
        let video_id = extract_video_id(input).ok_or_else(|| {
            Error::InvalidInput(format!("could not extract a video ID from: {input}"))
        })?;

        let memo_key = format!("{video_id}:{}", self.lang);
        let cached = match self.transcripts.get(&memo_key) {
            Some(hit) => hit,
            None => {
                let fresh = self.acquire_url(&video_id).await?;
                self.transcripts.insert(memo_key, fresh.clone());
                fresh
            }
        };

        Ok(Report {
            video_id: Some(video_id),
            title: cached.title,
            language: self.lang.clone(),
            source: cached.source,
            transcript: cached.text,
            summary: None,
        })
    }

    /// Acquire the transcript for a local video file without summarizing.
    pub async fn fetch_transcript_file(&self, path: &Path) -> Result<Report> {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let memo_key = format!("file:{}", canonical.display());

        let cached = match self.transcripts.get(&memo_key) {
            Some(hit) => hit,
            None => {
                let fresh = self.acquire_file(path).await?;
                self.transcripts.insert(memo_key, fresh.clone());
                fresh
            }
        };

        Ok(Report {
            video_id: None,
            title: cached.title,
            language: self.lang.clone(),
            source: cached.source,
            transcript: cached.text,
            summary: None,
        })
    }

    async fn acquire_url(&self, video_id: &str) -> Result<CachedTranscript> {
        // The workdir scopes every temporary artifact to this request and is
        // removed on all exit paths, including failures.
        let workdir = tempfile::tempdir()?;

        let resolution =
            youtube::resolve(&self.tool, video_id, &self.lang, workdir.path(), self.fallback)?;

        let (text, source) = match resolution.acquired {
            Acquired::Captions { text, kind, .. } => {
                info!("Using caption fast path for {video_id} ({kind:?} track)");
                (text, TranscriptSource::Caption)
            }
            Acquired::Audio { path } => {
                info!("Transcribing audio fallback for {video_id}");
                let text = self.stt.transcribe(&path).await?;
                let _ = std::fs::remove_file(&path);
                (text, TranscriptSource::Whisper)
            }
        };

        Ok(CachedTranscript {
            text,
            source,
            title: resolution.title,
        })
    }

    async fn acquire_file(&self, path: &Path) -> Result<CachedTranscript> {
        let workdir = tempfile::tempdir()?;

        let audio = media::extract_audio(path, workdir.path())?;
        let text = self.stt.transcribe(&audio).await?;
        let _ = std::fs::remove_file(&audio);

        Ok(CachedTranscript {
            text,
            source: TranscriptSource::Whisper,
            title: path.file_stem().map(|s| s.to_string_lossy().to_string()),
        })
    }

    async fn summarize_memoized(&self, transcript: &str) -> Result<String> {
        let key = transcript.to_string();
        if let Some(hit) = self.summaries.get(&key) {
            return Ok(hit);
        }

        let summary =
            summarize::summarize_transcript(&self.summarizer, transcript, self.max_chunk_chars)
                .await?;
        self.summaries.insert(key, summary.clone());
        Ok(summary)
    }
}
