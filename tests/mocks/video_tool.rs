use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ytsum::Result;
use ytsum::youtube::{CaptionKind, VideoProbe, VideoTool};

/// Deterministic stand-in for yt-dlp: serves a canned probe and writes
/// fixture files instead of touching the network.
pub struct MockVideoTool {
    pub manual_langs: Vec<String>,
    pub auto_langs: Vec<String>,
    pub vtt_fixture: String,
    pub probe_calls: Arc<Mutex<usize>>,
    pub caption_fetches: Arc<Mutex<Vec<String>>>,
    pub audio_fetches: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockVideoTool {
    fn new(manual_langs: &[&str], auto_langs: &[&str], vtt: &str) -> Self {
        Self {
            manual_langs: manual_langs.iter().map(|l| l.to_string()).collect(),
            auto_langs: auto_langs.iter().map(|l| l.to_string()).collect(),
            vtt_fixture: vtt.to_string(),
            probe_calls: Arc::new(Mutex::new(0)),
            caption_fetches: Arc::new(Mutex::new(Vec::new())),
            audio_fetches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_manual_captions(vtt: &str) -> Self {
        Self::new(&["en"], &[], vtt)
    }

    pub fn with_auto_captions(vtt: &str) -> Self {
        Self::new(&[], &["en"], vtt)
    }

    pub fn without_captions() -> Self {
        Self::new(&[], &[], "")
    }
}

impl VideoTool for MockVideoTool {
    fn probe(&self, _video_id: &str) -> Result<VideoProbe> {
        *self.probe_calls.lock().unwrap() += 1;

        let track = serde_json::json!([{"ext": "vtt"}]);
        let mut probe = VideoProbe {
            title: Some("Mock Video".to_string()),
            ..Default::default()
        };
        for lang in &self.manual_langs {
            probe.subtitles.insert(lang.clone(), track.clone());
        }
        for lang in &self.auto_langs {
            probe.automatic_captions.insert(lang.clone(), track.clone());
        }
        Ok(probe)
    }

    fn fetch_captions(
        &self,
        video_id: &str,
        lang: &str,
        _kind: CaptionKind,
        dest_dir: &Path,
    ) -> Result<PathBuf> {
        self.caption_fetches.lock().unwrap().push(lang.to_string());
        let path = dest_dir.join(format!("{video_id}.{lang}.vtt"));
        std::fs::write(&path, &self.vtt_fixture)?;
        Ok(path)
    }

    fn fetch_audio(&self, video_id: &str, dest_dir: &Path) -> Result<PathBuf> {
        let path = dest_dir.join(format!("{video_id}.mp3"));
        std::fs::write(&path, b"mp3-bytes")?;
        self.audio_fetches.lock().unwrap().push(path.clone());
        Ok(path)
    }
}
