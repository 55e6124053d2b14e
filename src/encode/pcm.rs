use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::encode::ensure_parent_dir;
use crate::encode::sink::{SampleSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HilligossError, HilligossResult};

/// Headerless interleaved `s16le` file sink.
#[derive(Debug)]
pub struct PcmSink {
    out_path: PathBuf,
    writer: Option<BufWriter<File>>,
    scratch: Vec<u8>,
}

impl PcmSink {
    /// Sink writing to `out_path`; the file is created in `begin`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            writer: None,
            scratch: Vec::new(),
        }
    }
}

impl SampleSink for PcmSink {
    fn begin(&mut self, cfg: SinkConfig) -> HilligossResult<()> {
        cfg.validate()?;
        if self.writer.is_some() {
            return Err(HilligossError::encode("pcm sink already started"));
        }
        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path).map_err(|e| {
            HilligossError::encode(format!(
                "failed to create pcm file '{}': {e}",
                self.out_path.display()
            ))
        })?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, samples: &[i16]) -> HilligossResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| HilligossError::encode("pcm sink push_frame called before begin"))?;
        self.scratch.clear();
        self.scratch.reserve(samples.len() * 2);
        for s in samples {
            self.scratch.extend_from_slice(&s.to_le_bytes());
        }
        writer
            .write_all(&self.scratch)
            .map_err(|e| HilligossError::encode(format!("pcm write failed: {e}")))
    }

    fn end(&mut self) -> HilligossResult<()> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| HilligossError::encode("pcm sink end called before begin"))?;
        writer
            .flush()
            .map_err(|e| HilligossError::encode(format!("pcm flush failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/pcm.rs"]
mod tests;
