//! Video to audio conversion
//!
//! Download, transcode and re-upload a video as MP3. All intermediate files
//! live in one temporary directory that is removed when the conversion ends,
//! whether it succeeded or not.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{error, info, warn};
use crate::config::ConverterConfig;
use crate::models::VideoAttachment;
use crate::utils::errors::{Result, TransferError, TransferResult};
use super::messenger::Messenger;

/// External audio transcoder
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Convert `input` into an audio file at `output`
    async fn convert(&self, input: &Path, output: &Path) -> TransferResult<()>;
}

/// Transcoder that shells out to ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: String,
    bitrate: String,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>, bitrate: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            bitrate: bitrate.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(&config.ffmpeg_path, &config.audio_bitrate, config.timeout())
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn convert(&self, input: &Path, output: &Path) -> TransferResult<()> {
        let child = Command::new(&self.binary)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-vn", "-acodec", "libmp3lame", "-b:a", self.bitrate.as_str()])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => TransferError::TranscoderUnavailable(self.binary.clone()),
                _ => TransferError::Io(e),
            })?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| TransferError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(3).collect();
            return Err(TransferError::Transcode(format!(
                "{} exited with {}: {}",
                self.binary,
                result.status,
                tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
            )));
        }

        Ok(())
    }
}

pub const CONVERTING_TEXT: &str = "⏳ Converting your video to audio...";

#[derive(Clone)]
pub struct ConversionService {
    messenger: Arc<dyn Messenger>,
    transcoder: Arc<dyn AudioTranscoder>,
    max_file_size: u64,
}

impl ConversionService {
    pub fn new(messenger: Arc<dyn Messenger>, transcoder: Arc<dyn AudioTranscoder>, max_file_size: u64) -> Self {
        Self {
            messenger,
            transcoder,
            max_file_size,
        }
    }

    /// Convert `video` and send the audio back to `chat_id`
    pub async fn convert_video(&self, chat_id: i64, video: &VideoAttachment) -> Result<()> {
        if video.file_size > self.max_file_size {
            return Err(TransferError::TooLarge {
                size: video.file_size,
                limit: self.max_file_size,
            }
            .into());
        }

        let status_message = self.messenger.send_text(chat_id, CONVERTING_TEXT, None).await?;
        let result = self.run_pipeline(chat_id, video).await;

        if let Err(e) = self.messenger.delete_message(chat_id, status_message).await {
            warn!(chat_id = chat_id, error = %e, "Failed to delete status message");
        }

        match &result {
            Ok(()) => info!(chat_id = chat_id, size = video.file_size, "Video converted"),
            Err(e) => error!(chat_id = chat_id, error = %e, "Video conversion failed"),
        }
        result
    }

    async fn run_pipeline(&self, chat_id: i64, video: &VideoAttachment) -> Result<()> {
        let workdir = tempfile::Builder::new()
            .prefix("idbot-convert-")
            .tempdir()
            .map_err(TransferError::Io)?;
        let input = workdir.path().join("input.video");
        let output = workdir.path().join("audio.mp3");

        self.messenger.download_file(&video.file_id, &input).await?;
        self.transcoder.convert(&input, &output).await?;

        let title = video
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str());
        self.messenger.send_audio(chat_id, &output, title).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_ffmpeg_binary() {
        let dir = tempfile::tempdir().unwrap();
        let transcoder = FfmpegTranscoder::new(
            "/nonexistent/ffmpeg-idbot",
            "192k",
            Duration::from_secs(5),
        );

        let result = transcoder
            .convert(&dir.path().join("in.mp4"), &dir.path().join("out.mp3"))
            .await;

        assert!(matches!(result, Err(TransferError::TranscoderUnavailable(_))));
    }
}
