use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HilligossError, HilligossResult};

/// Configuration provided to a [`SampleSink`] before the first buffer arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count. Always 2 (X, Y) for traced output.
    pub channels: u16,
}

impl SinkConfig {
    /// Stereo X/Y configuration at `sample_rate`.
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 2,
        }
    }

    pub(crate) fn validate(&self) -> HilligossResult<()> {
        if self.sample_rate == 0 {
            return Err(HilligossError::validation("sink sample_rate must be > 0"));
        }
        if self.channels == 0 {
            return Err(HilligossError::validation("sink channels must be > 0"));
        }
        Ok(())
    }
}

/// Sink contract for consuming traced buffers in output order.
///
/// Ordering contract: `push_frame` is called with non-decreasing [`FrameIndex`] values; a source
/// frame repeated for sync appears as consecutive pushes with the same index.
pub trait SampleSink: Send {
    /// Called once before any buffers are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> HilligossResult<()>;
    /// Push one interleaved buffer.
    fn push_frame(&mut self, idx: FrameIndex, samples: &[i16]) -> HilligossResult<()>;
    /// Called once after the last buffer is pushed.
    fn end(&mut self) -> HilligossResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Vec<i16>)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured buffers.
    pub fn frames(&self) -> &[(FrameIndex, Vec<i16>)] {
        &self.frames
    }

    /// All captured samples, concatenated in push order.
    pub fn samples(&self) -> Vec<i16> {
        self.frames
            .iter()
            .flat_map(|(_, s)| s.iter().copied())
            .collect()
    }

    /// `end` has been called since the last `begin`.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl SampleSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> HilligossResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, samples: &[i16]) -> HilligossResult<()> {
        self.frames.push((idx, samples.to_vec()));
        Ok(())
    }

    fn end(&mut self) -> HilligossResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
