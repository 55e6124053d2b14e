use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout};

use crate::foundation::core::{GRID_CELLS, Grid};
use crate::foundation::error::{HilligossError, HilligossResult};
use crate::source::FrameSource;

/// Streams grayscale 512x512 frames out of any container the system `ffmpeg` can read.
///
/// `ffmpeg` does the decode, the aspect-preserving scale, the black padding and the gray
/// conversion; this side only slices its rawvideo stdout into grids.
pub struct FfmpegVideoSource {
    source_path: PathBuf,
    fps: Option<f64>,
    child: Option<Child>,
    stdout: Option<ChildStdout>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl std::fmt::Debug for FfmpegVideoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegVideoSource")
            .field("source_path", &self.source_path)
            .field("fps", &self.fps)
            .field("running", &self.child.is_some())
            .finish()
    }
}

impl FfmpegVideoSource {
    /// Probe `path` and start decoding it.
    #[cfg(feature = "media-ffmpeg")]
    pub fn open(path: &Path) -> HilligossResult<Self> {
        use std::process::{Command, Stdio};

        use crate::foundation::core::GRID_SIDE;

        if !is_ffmpeg_on_path() {
            return Err(HilligossError::decode(
                "ffmpeg is required for video input, but was not found on PATH",
            ));
        }
        let fps = probe_fps(path)?;

        let filter = format!(
            "scale={GRID_SIDE}:{GRID_SIDE}:force_original_aspect_ratio=decrease,\
             pad={GRID_SIDE}:{GRID_SIDE}:(ow-iw)/2:(oh-ih)/2:color=black"
        );
        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(path)
            .args([
                "-an", "-vf", &filter, "-f", "rawvideo", "-pix_fmt", "gray", "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                HilligossError::decode(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HilligossError::decode("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| HilligossError::decode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::info!(path = %path.display(), fps, "video decode started");
        Ok(Self {
            source_path: path.to_path_buf(),
            fps,
            child: Some(child),
            stdout: Some(stdout),
            stderr_drain: Some(stderr_drain),
        })
    }

    /// Probe `path` and start decoding it.
    ///
    /// Returns an error when the `media-ffmpeg` feature is disabled.
    #[cfg(not(feature = "media-ffmpeg"))]
    pub fn open(path: &Path) -> HilligossResult<Self> {
        Err(HilligossError::decode(format!(
            "video input '{}' requires the 'media-ffmpeg' feature",
            path.display()
        )))
    }

    /// Wait for `ffmpeg` and surface its stderr if it failed.
    fn finish(&mut self) -> HilligossResult<()> {
        drop(self.stdout.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(|e| {
            HilligossError::decode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| HilligossError::decode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| HilligossError::decode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(HilligossError::decode(format!(
                "ffmpeg exited with status {status} while decoding '{}': {}",
                self.source_path.display(),
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

impl FrameSource for FfmpegVideoSource {
    fn next_frame(&mut self) -> HilligossResult<Option<Grid>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };

        let mut buf = vec![0u8; GRID_CELLS];
        let filled = fill_frame(stdout, &mut buf).map_err(|e| {
            HilligossError::decode(format!("failed to read frame from ffmpeg: {e}"))
        })?;
        if filled < GRID_CELLS {
            // End of stream, clean or not: reap the child so a failure surfaces its stderr.
            self.finish()?;
        }
        grid_from_frame(buf, filled)
    }

    fn fps_hint(&self) -> Option<f64> {
        self.fps
    }
}

impl Drop for FfmpegVideoSource {
    fn drop(&mut self) {
        drop(self.stdout.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Read until `buf` is full or the stream ends; returns the number of bytes filled.
fn fill_frame(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// `0` bytes is a clean end of stream; anything short of a full grid is a truncated frame.
fn grid_from_frame(buf: Vec<u8>, filled: usize) -> HilligossResult<Option<Grid>> {
    match filled {
        0 => Ok(None),
        n if n == GRID_CELLS => Grid::from_bytes(buf).map(Some),
        n => Err(HilligossError::decode(format!(
            "ffmpeg produced a truncated frame ({n} of {GRID_CELLS} bytes)"
        ))),
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Average frame rate of the first video stream, via `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
fn probe_fps(path: &Path) -> HilligossResult<Option<f64>> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        avg_frame_rate: Option<String>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .map_err(|e| HilligossError::decode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(HilligossError::decode(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| HilligossError::decode(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| HilligossError::decode("no video stream found"))?;
    Ok(stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rational)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_rational)))
}

/// Parse ffprobe's `num/den` rate strings; `0/0` and garbage give `None`.
#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
pub(crate) fn parse_rational(s: &str) -> Option<f64> {
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim().parse::<f64>().ok()?, d.trim().parse::<f64>().ok()?),
        None => (s.trim().parse::<f64>().ok()?, 1.0),
    };
    let v = num / den;
    (v.is_finite() && v > 0.0).then_some(v)
}

#[cfg(test)]
#[path = "../../tests/unit/source/video.rs"]
mod tests;
