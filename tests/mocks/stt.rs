use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ytsum::error::{Error, Result};
use ytsum::stt::SpeechToText;

pub struct MockSpeechToText {
    pub transcript: String,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockSpeechToText {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            transcript: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl SpeechToText for MockSpeechToText {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        self.calls.lock().unwrap().push(audio.to_path_buf());
        if let Some(ref msg) = self.fail_with {
            return Err(Error::Transcription(msg.clone()));
        }
        Ok(self.transcript.clone())
    }
}
