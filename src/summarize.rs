use std::future::Future;

use log::debug;

use crate::error::{Error, Result};

/// Returned in place of a summary when the transcript has no content.
/// The summarization capability is never invoked in that case.
pub const EMPTY_TRANSCRIPT_PLACEHOLDER: &str =
    "The transcript was empty, so no summary could be generated.";

/// Default maximum characters handed to the summarizer per call
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 1024;

/// Fixed per-chunk output bounds
pub const MIN_SUMMARY_LENGTH: u32 = 30;
pub const MAX_SUMMARY_LENGTH: u32 = 130;

/// Opaque per-chunk summarization capability
pub trait Summarizer {
    fn summarize(&self, chunk: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Split text into contiguous chunks of at most `max_chars` characters.
/// Boundaries are character positions, not word or sentence breaks, so the
/// chunks concatenate back to the original text.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split);
        chunks.push(head);
        rest = tail;
    }

    chunks
}

/// Summarize a transcript of arbitrary length: each chunk is summarized
/// independently and the parts are joined with single spaces in chunk order.
/// No cross-chunk context is shared.
pub async fn summarize_transcript<S: Summarizer>(
    summarizer: &S,
    transcript: &str,
    max_chunk_chars: usize,
) -> Result<String> {
    if transcript.trim().is_empty() {
        return Ok(EMPTY_TRANSCRIPT_PLACEHOLDER.to_string());
    }

    let chunks = chunk_text(transcript, max_chunk_chars);
    debug!("Summarizing {} chunk(s)", chunks.len());

    let mut parts = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        parts.push(summarizer.summarize(chunk).await?);
    }

    Ok(parts.join(" "))
}

/// Summarization via the Hugging Face inference API
pub struct HfSummarizer {
    client: reqwest::Client,
    model: String,
}

impl HfSummarizer {
    pub fn new(client: reqwest::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn api_url(&self) -> String {
        format!("https://api-inference.huggingface.co/models/{}", self.model)
    }

    fn api_token() -> Result<String> {
        std::env::var("HF_API_TOKEN").map_err(|_| {
            Error::Summarization(
                "HF_API_TOKEN environment variable not set (required for summarization)".to_string(),
            )
        })
    }
}

impl Summarizer for HfSummarizer {
    async fn summarize(&self, chunk: &str) -> Result<String> {
        let api_token = Self::api_token()?;

        debug!("Summarizing {} chars via {}", chunk.chars().count(), self.model);

        let body = serde_json::json!({
            "inputs": chunk,
            "parameters": {
                "max_length": MAX_SUMMARY_LENGTH,
                "min_length": MIN_SUMMARY_LENGTH,
                "do_sample": false
            }
        });

        let resp = self
            .client
            .post(self.api_url())
            .bearer_auth(&api_token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Summarization(format!(
                "summarization API returned {status}: {body}"
            )));
        }

        let json: serde_json::Value = resp.json().await?;
        extract_summary_text(&json)
    }
}

fn extract_summary_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json
        .get(0)
        .and_then(|entry| entry.get("summary_text"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    Err(Error::Summarization(
        "unexpected summarization API response format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    struct MockSummarizer {
        calls: Mutex<Vec<String>>,
    }

    impl MockSummarizer {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl Summarizer for MockSummarizer {
        async fn summarize(&self, chunk: &str) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(chunk.to_string());
            Ok(format!("S{}", calls.len()))
        }
    }

    #[test]
    fn test_chunk_count_matches_ceil() {
        for (len, max, expected) in [(0usize, 1024usize, 0usize), (1, 1024, 1), (1024, 1024, 1), (1025, 1024, 2), (3000, 1000, 3)] {
            let text = "x".repeat(len);
            assert_eq!(chunk_text(&text, max).len(), expected, "len={len} max={max}");
        }
    }

    #[test]
    fn test_chunks_concatenate_to_original() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunks = chunk_text(&text, 100);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunk_lengths_2500_at_1024() {
        let text = "a".repeat(2500);
        let chunks = chunk_text(&text, 1024);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![1024, 1024, 452]);
    }

    #[test]
    fn test_chunking_is_character_based() {
        // multi-byte characters count as one each
        let text = "é".repeat(10);
        let chunks = chunk_text(&text, 4);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![4, 4, 2]);
        assert_eq!(chunks.concat(), text);
    }

    #[tokio::test]
    async fn test_empty_transcript_returns_placeholder_without_invoking() {
        let mock = MockSummarizer::new();
        let summary = summarize_transcript(&mock, "", 1024).await.unwrap();
        assert_eq!(summary, EMPTY_TRANSCRIPT_PLACEHOLDER);
        assert!(mock.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_transcript_returns_placeholder_without_invoking() {
        let mock = MockSummarizer::new();
        let summary = summarize_transcript(&mock, "  \n\t ", 1024).await.unwrap();
        assert_eq!(summary, EMPTY_TRANSCRIPT_PLACEHOLDER);
        assert!(mock.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parts_joined_in_chunk_order() {
        let mock = MockSummarizer::new();
        let text = "x".repeat(250);
        let summary = summarize_transcript(&mock, &text, 100).await.unwrap();
        assert_eq!(summary, "S1 S2 S3");

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls.concat(), text);
    }

    #[test]
    fn test_extract_summary_text() {
        let json = serde_json::json!([{"summary_text": "A short summary."}]);
        assert_eq!(extract_summary_text(&json).unwrap(), "A short summary.");
    }

    #[test]
    fn test_extract_summary_text_unexpected_shape() {
        let json = serde_json::json!({"error": "model loading"});
        assert!(extract_summary_text(&json).is_err());
    }

    #[test]
    fn test_extract_summary_text_empty_array() {
        let json = serde_json::json!([]);
        assert!(extract_summary_text(&json).is_err());
    }
}
