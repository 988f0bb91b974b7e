use crate::engine::config::MovieOptions;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

const FFMPEG_BIN: &str = "ffmpeg";

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Failed to launch {FFMPEG_BIN}: {0}")]
    Launch(#[from] std::io::Error),

    #[error("{FFMPEG_BIN} exited with {status}: {stderr}")]
    Encoder { status: String, stderr: String },
}

/// Stitches numbered frame images into a movie through the external
/// `ffmpeg` binary.
pub struct FfmpegEncoder<'a> {
    options: &'a MovieOptions,
}

impl<'a> FfmpegEncoder<'a> {
    pub fn new(options: &'a MovieOptions) -> Self {
        Self { options }
    }

    /// Encodes the frames matching a printf-style input pattern (e.g.
    /// `frames/buried_%05d.png`) into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Launch`] when the binary cannot be spawned
    /// and [`MovieError::Encoder`] when it exits unsuccessfully. Callers
    /// decide whether a failed encode aborts their pipeline; the rendered
    /// frames stay on disk either way.
    pub fn encode(&self, pattern: &str, output: &Path) -> Result<(), MovieError> {
        info!(pattern, output = %output.display(), "Encoding movie.");

        let result = Command::new(FFMPEG_BIN)
            .args(self.command_args(pattern, output))
            .output()?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let mut tail: Vec<&str> = stderr.lines().rev().take(4).collect();
            tail.reverse();
            return Err(MovieError::Encoder {
                status: result.status.to_string(),
                stderr: tail.join(" | "),
            });
        }

        debug!(output = %output.display(), "Movie encoded.");
        Ok(())
    }

    fn command_args(&self, pattern: &str, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-r"),
            OsString::from(self.options.frame_rate.to_string()),
            OsString::from("-i"),
            OsString::from(pattern),
            OsString::from("-vcodec"),
            OsString::from(&self.options.codec),
            OsString::from("-y"),
            OsString::from("-vb"),
            OsString::from(&self.options.bitrate),
            output.as_os_str().to_os_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn command_args_follow_the_expected_invocation() {
        let options = MovieOptions::default();
        let encoder = FfmpegEncoder::new(&options);
        let args = encoder.command_args("frames/buried_%05d.png", &PathBuf::from("buried.mp4"));

        let expected: Vec<OsString> = [
            "-r",
            "5",
            "-i",
            "frames/buried_%05d.png",
            "-vcodec",
            "mpeg4",
            "-y",
            "-vb",
            "40M",
            "buried.mp4",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn command_args_honor_custom_options() {
        let options = MovieOptions {
            frame_rate: 24,
            codec: "libx264".to_string(),
            bitrate: "10M".to_string(),
        };
        let encoder = FfmpegEncoder::new(&options);
        let args = encoder.command_args("f_%05d.png", &PathBuf::from("out.mp4"));

        assert_eq!(args[1], OsString::from("24"));
        assert_eq!(args[5], OsString::from("libx264"));
        assert_eq!(args[8], OsString::from("10M"));
    }
}
