use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};

/// Container formats accepted for local video input
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Extract the audio stream from a local video file into `workdir` as mp3,
/// returning the output path. The input file is left untouched.
pub fn extract_audio(input: &Path, workdir: &Path) -> Result<PathBuf> {
    if !input.exists() {
        return Err(Error::InvalidInput(format!("file not found: {}", input.display())));
    }
    if !is_supported(input) {
        return Err(Error::InvalidInput(format!(
            "unsupported container format: {} (expected one of: {})",
            input.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let output_path = workdir.join(format!("{stem}.mp3"));

    info!("Extracting audio from {}", input.display());

    let result = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(input)
        .args(["-vn", "-acodec", "libmp3lame", "-b:a", "192k"])
        .arg(&output_path)
        .output();

    let output = match result {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::TranscodeFailed(
                "ffmpeg not found. Install FFmpeg and ensure it is on PATH".to_string(),
            ));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::TranscodeFailed(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    if !output_path.exists() {
        return Err(Error::TranscodeFailed(
            "ffmpeg did not produce an output file".to_string(),
        ));
    }

    debug!("Audio extracted to {}", output_path.display());
    Ok(output_path)
}
