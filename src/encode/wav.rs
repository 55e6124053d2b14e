use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::encode::ensure_parent_dir;
use crate::encode::sink::{SampleSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HilligossError, HilligossResult};

/// 16-bit PCM WAV file sink backed by `hound`.
pub struct WavSink {
    out_path: PathBuf,
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    channels: u16,
}

impl std::fmt::Debug for WavSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavSink")
            .field("out_path", &self.out_path)
            .field("open", &self.writer.is_some())
            .finish()
    }
}

impl WavSink {
    /// Sink writing to `out_path`; the file is created in `begin`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            writer: None,
            channels: 2,
        }
    }
}

impl SampleSink for WavSink {
    fn begin(&mut self, cfg: SinkConfig) -> HilligossResult<()> {
        cfg.validate()?;
        if self.writer.is_some() {
            return Err(HilligossError::encode("wav sink already started"));
        }
        ensure_parent_dir(&self.out_path)?;
        let spec = hound::WavSpec {
            channels: cfg.channels,
            sample_rate: cfg.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let writer = hound::WavWriter::create(&self.out_path, spec).map_err(|e| {
            HilligossError::encode(format!(
                "failed to create wav file '{}': {e}",
                self.out_path.display()
            ))
        })?;
        self.channels = cfg.channels;
        self.writer = Some(writer);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, samples: &[i16]) -> HilligossResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| HilligossError::encode("wav sink push_frame called before begin"))?;
        if samples.len() % usize::from(self.channels) != 0 {
            return Err(HilligossError::encode(format!(
                "frame {} has {} samples, not a multiple of {} channels",
                idx.0,
                samples.len(),
                self.channels
            )));
        }
        for &s in samples {
            writer
                .write_sample(s)
                .map_err(|e| HilligossError::encode(format!("wav write failed: {e}")))?;
        }
        Ok(())
    }

    fn end(&mut self) -> HilligossResult<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| HilligossError::encode("wav sink end called before begin"))?;
        writer
            .finalize()
            .map_err(|e| HilligossError::encode(format!("wav finalize failed: {e}")))?;
        tracing::debug!(path = %self.out_path.display(), "wav written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/wav.rs"]
mod tests;
