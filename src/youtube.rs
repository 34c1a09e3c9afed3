use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::vtt;

/// Caption availability for one video, as reported by the download tool
/// without fetching any media. The track maps are keyed by language code.
#[derive(Debug, Default, Deserialize)]
pub struct VideoProbe {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub subtitles: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub automatic_captions: HashMap<String, serde_json::Value>,
}

/// Whether a caption track was authored by the creator or machine-generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionKind {
    Manual,
    Auto,
}

/// What acquisition resolved to
#[derive(Debug)]
pub enum Acquired {
    /// Fast path: normalized caption text. No media was downloaded and the
    /// caption file has already been deleted.
    Captions {
        text: String,
        language: String,
        kind: CaptionKind,
    },
    /// Fallback path: audio downloaded into the request workdir, to be
    /// consumed by speech-to-text and then deleted by the caller.
    Audio { path: PathBuf },
}

/// Outcome of resolving one video
#[derive(Debug)]
pub struct Resolution {
    pub title: Option<String>,
    pub acquired: Acquired,
}

/// Access to the video platform through the metadata/download tool
pub trait VideoTool {
    /// Query caption availability without downloading media
    fn probe(&self, video_id: &str) -> Result<VideoProbe>;

    /// Download only the selected caption track into `dest_dir`, returning
    /// the path of the caption file
    fn fetch_captions(
        &self,
        video_id: &str,
        lang: &str,
        kind: CaptionKind,
        dest_dir: &Path,
    ) -> Result<PathBuf>;

    /// Download only the audio stream into `dest_dir` as mp3
    fn fetch_audio(&self, video_id: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Pick the caption track to use: a manually authored track in the target
/// language wins over an auto-generated one; neither means audio fallback.
pub fn select_caption_kind(probe: &VideoProbe, lang: &str) -> Option<CaptionKind> {
    if probe.subtitles.contains_key(lang) {
        Some(CaptionKind::Manual)
    } else if probe.automatic_captions.contains_key(lang) {
        Some(CaptionKind::Auto)
    } else {
        None
    }
}

/// Resolve a video to either normalized caption text or a downloaded audio
/// file. The caption file is deleted as soon as it has been read; the audio
/// file lives in `workdir` and is the caller's to consume and remove.
///
/// With `fallback` disabled, a caption miss is an `AcquisitionFailed` error
/// instead of an audio download.
pub fn resolve<T: VideoTool>(
    tool: &T,
    video_id: &str,
    lang: &str,
    workdir: &Path,
    fallback: bool,
) -> Result<Resolution> {
    let probe = tool.probe(video_id)?;
    let title = probe.title.clone();

    if let Some(kind) = select_caption_kind(&probe, lang) {
        debug!("Caption track found for {video_id}: lang={lang} kind={kind:?}");
        let caption_path = tool.fetch_captions(video_id, lang, kind, workdir)?;
        let raw = std::fs::read_to_string(&caption_path)?;
        let _ = std::fs::remove_file(&caption_path);
        return Ok(Resolution {
            title,
            acquired: Acquired::Captions {
                text: vtt::normalize(&raw),
                language: lang.to_string(),
                kind,
            },
        });
    }

    if !fallback {
        return Err(Error::AcquisitionFailed(format!(
            "no {lang} captions available for video {video_id} and audio fallback is disabled"
        )));
    }

    debug!("No {lang} captions for {video_id}; falling back to audio download");
    let path = tool.fetch_audio(video_id, workdir)?;
    Ok(Resolution {
        title,
        acquired: Acquired::Audio { path },
    })
}

/// yt-dlp-backed implementation of `VideoTool`
pub struct YtDlpTool;

impl YtDlpTool {
    fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }

    fn run(args: &[&str]) -> Result<std::process::Output> {
        debug!("yt-dlp {}", args.join(" "));

        let output = Command::new("yt-dlp").args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::AcquisitionFailed(
                    "yt-dlp not found. Install it:\n  pip install yt-dlp\n  or: brew install yt-dlp"
                        .to_string(),
                )
            } else {
                Error::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::AcquisitionFailed(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}

impl VideoTool for YtDlpTool {
    fn probe(&self, video_id: &str) -> Result<VideoProbe> {
        let url = Self::watch_url(video_id);
        let output = Self::run(&[
            "--dump-single-json",
            "--skip-download",
            "--no-playlist",
            "--no-warnings",
            &url,
        ])?;
        let probe: VideoProbe = serde_json::from_slice(&output.stdout)?;
        Ok(probe)
    }

    fn fetch_captions(
        &self,
        video_id: &str,
        lang: &str,
        kind: CaptionKind,
        dest_dir: &Path,
    ) -> Result<PathBuf> {
        let url = Self::watch_url(video_id);
        let template = dest_dir.join(format!("{video_id}.%(ext)s"));
        let template = template.to_string_lossy();

        let write_flag = match kind {
            CaptionKind::Manual => "--write-subs",
            CaptionKind::Auto => "--write-auto-subs",
        };

        Self::run(&[
            "--skip-download",
            "--no-playlist",
            "--no-warnings",
            write_flag,
            "--sub-langs",
            lang,
            "--sub-format",
            "vtt",
            "-o",
            &template,
            &url,
        ])?;

        find_caption_file(dest_dir, video_id, lang)?.ok_or_else(|| {
            Error::AcquisitionFailed(format!(
                "no caption file produced for video {video_id} ({lang})"
            ))
        })
    }

    fn fetch_audio(&self, video_id: &str, dest_dir: &Path) -> Result<PathBuf> {
        let url = Self::watch_url(video_id);
        let template = dest_dir.join(format!("{video_id}.%(ext)s"));
        let template = template.to_string_lossy();
        let audio_path = dest_dir.join(format!("{video_id}.mp3"));

        Self::run(&[
            "--extract-audio",
            "--audio-format",
            "mp3",
            // lowest quality = smallest file; speech doesn't need more
            "--audio-quality",
            "9",
            "--no-playlist",
            "--no-warnings",
            "-o",
            &template,
            &url,
        ])?;

        if !audio_path.exists() {
            return Err(Error::AcquisitionFailed(format!(
                "yt-dlp did not produce expected audio file: {}",
                audio_path.display()
            )));
        }

        Ok(audio_path)
    }
}

/// yt-dlp names caption files `<id>.<lang>.vtt`, sometimes with a region
/// suffix on the language (en-US, en-orig).
fn find_caption_file(dir: &Path, video_id: &str, lang: &str) -> Result<Option<PathBuf>> {
    let exact = dir.join(format!("{video_id}.{lang}.vtt"));
    if exact.exists() {
        return Ok(Some(exact));
    }

    let prefix = format!("{video_id}.{lang}");
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("vtt")
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix))
        {
            return Ok(Some(path));
        }
    }

    Ok(None)
}
