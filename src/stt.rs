use std::future::Future;
use std::path::Path;

use log::debug;
use reqwest::multipart;

use crate::error::{Error, Result};

/// Maximum file size for a single transcription upload (25 MB API limit)
const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Opaque speech-to-text capability: consumes a local audio file path and
/// returns transcript text. The input file stays owned by the caller, which
/// deletes it after the call returns.
pub trait SpeechToText {
    fn transcribe(&self, audio: &Path) -> impl Future<Output = Result<String>> + Send;
}

/// Whisper transcription model on the OpenAI audio API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WhisperModel {
    Gpt4oMiniTranscribe,
    Gpt4oTranscribe,
    #[default]
    Whisper1,
}

impl WhisperModel {
    pub fn api_name(&self) -> &str {
        match self {
            WhisperModel::Gpt4oMiniTranscribe => "gpt-4o-mini-transcribe",
            WhisperModel::Gpt4oTranscribe => "gpt-4o-transcribe",
            WhisperModel::Whisper1 => "whisper-1",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gpt-4o-mini-transcribe" => Some(WhisperModel::Gpt4oMiniTranscribe),
            "gpt-4o-transcribe" => Some(WhisperModel::Gpt4oTranscribe),
            "whisper-1" => Some(WhisperModel::Whisper1),
            _ => None,
        }
    }
}

/// Speech-to-text via the OpenAI audio transcription API
pub struct WhisperApi {
    client: reqwest::Client,
    model: WhisperModel,
    language: String,
}

impl WhisperApi {
    pub fn new(client: reqwest::Client, model: WhisperModel, language: impl Into<String>) -> Self {
        Self {
            client,
            model,
            language: language.into(),
        }
    }

    fn api_key() -> Result<String> {
        std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Transcription(
                "OPENAI_API_KEY environment variable not set (required for audio transcription)"
                    .to_string(),
            )
        })
    }
}

impl SpeechToText for WhisperApi {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        let api_key = Self::api_key()?;

        let file_size = std::fs::metadata(audio)?.len();
        debug!("Uploading {} ({file_size} bytes) for transcription", audio.display());

        if file_size > MAX_UPLOAD_BYTES {
            return Err(Error::Transcription(format!(
                "audio file {} exceeds the {} MB upload limit",
                audio.display(),
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let file_bytes = std::fs::read(audio)?;
        let file_name = audio.file_name().unwrap_or_default().to_string_lossy().to_string();

        let file_part = multipart::Part::bytes(file_bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.api_name().to_string())
            .text("language", self.language.clone())
            .text("response_format", "json");

        let resp = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .bearer_auth(&api_key)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "transcription API returned {status}: {body}"
            )));
        }

        let json: serde_json::Value = resp.json().await?;
        extract_transcript_text(&json)
    }
}

fn extract_transcript_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json.get("text").and_then(|t| t.as_str()) {
        return Ok(text.trim().to_string());
    }
    Err(Error::Transcription(
        "unexpected transcription API response format".to_string(),
    ))
}
