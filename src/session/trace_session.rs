use std::sync::Arc;

use rayon::prelude::*;

use crate::encode::sink::{SampleSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Grid, frame_seed};
use crate::foundation::error::{HilligossError, HilligossResult};
use crate::pipeline::params::TraceParams;
use crate::pipeline::trace::trace_frame_seeded;
use crate::source::FrameSource;

/// Options controlling multi-frame tracing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Trace each source frame this many times, with consecutive frame numbers.
    pub frame_loop: u32,
    /// Write each traced buffer this many times back to back.
    pub sync_count: u32,
    /// Enable call-level parallelism on a dedicated rayon pool.
    pub parallel: bool,
    /// Calls traced per chunk before results are flushed to the sink.
    pub batch_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Base seed; call `n` uses `frame_seed(seed, n)`.
    pub seed: u64,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            sample_rate: 192_000,
            frame_loop: 1,
            sync_count: 1,
            parallel: true,
            batch_size: 64,
            threads: None,
            seed: 0,
        }
    }
}

impl SessionOpts {
    /// Reject option combinations that cannot produce output.
    pub fn validate(&self) -> HilligossResult<()> {
        if self.sample_rate == 0 {
            return Err(HilligossError::validation("session 'sample_rate' must be > 0"));
        }
        if self.frame_loop == 0 {
            return Err(HilligossError::validation("session 'frame_loop' must be >= 1"));
        }
        if self.sync_count == 0 {
            return Err(HilligossError::validation("session 'sync_count' must be >= 1"));
        }
        if self.batch_size == 0 {
            return Err(HilligossError::validation("session 'batch_size' must be >= 1"));
        }
        Ok(())
    }
}

/// Per-call point count that keeps one source frame at `fps` once looped and synced.
///
/// `floor(sample_rate / fps / sync_count / frame_loop)`, never less than 1.
pub fn target_count_for(sample_rate: u32, fps: f64, sync_count: u32, frame_loop: u32) -> usize {
    if !(fps.is_finite() && fps > 0.0) {
        return 1;
    }
    let per = f64::from(sample_rate)
        / fps
        / f64::from(sync_count.max(1))
        / f64::from(frame_loop.max(1));
    (per.floor() as usize).max(1)
}

/// Session statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames pulled from the source.
    pub source_frames: u64,
    /// `trace_frame` invocations.
    pub calls: u64,
    /// Individual `i16` values handed to the sink.
    pub samples_written: u64,
}

/// One pending `trace_frame` invocation.
struct Call {
    grid: Arc<Grid>,
    frame: FrameIndex,
}

/// Multi-frame driver: pulls grids from a [`FrameSource`], traces them in chunks, and streams
/// the buffers to a [`SampleSink`] in call order.
#[derive(Debug)]
pub struct TraceSession {
    params: TraceParams,
    opts: SessionOpts,
    pool: Option<rayon::ThreadPool>,
}

impl TraceSession {
    /// Validate `params` and `opts` and build the worker pool when parallel.
    pub fn new(params: TraceParams, opts: SessionOpts) -> HilligossResult<Self> {
        params.validate()?;
        opts.validate()?;
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self { params, opts, pool })
    }

    /// Parameters every call uses.
    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    /// Session options.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Trace every frame of `source` into `sink`.
    ///
    /// The sink sees `begin`, then one push per written buffer, then `end`. A source error aborts
    /// the render: calls still pending in the current chunk are dropped and `end` is not called.
    #[tracing::instrument(skip_all, fields(parallel = self.pool.is_some()))]
    pub fn render_source(
        &self,
        source: &mut dyn FrameSource,
        sink: &mut dyn SampleSink,
    ) -> HilligossResult<SessionStats> {
        sink.begin(SinkConfig::stereo(self.opts.sample_rate))?;

        let mut stats = SessionStats::default();
        let mut pending = Vec::<Call>::with_capacity(self.opts.batch_size);
        let mut next_frame = 0u64;

        while let Some(grid) = source.next_frame()? {
            stats.source_frames += 1;
            let grid = Arc::new(grid);
            for _ in 0..self.opts.frame_loop {
                pending.push(Call {
                    grid: Arc::clone(&grid),
                    frame: FrameIndex(next_frame),
                });
                next_frame += 1;
                if pending.len() >= self.opts.batch_size {
                    self.flush_chunk(&mut pending, sink, &mut stats)?;
                }
            }
        }
        if !pending.is_empty() {
            self.flush_chunk(&mut pending, sink, &mut stats)?;
        }

        sink.end()?;
        tracing::info!(
            source_frames = stats.source_frames,
            calls = stats.calls,
            samples = stats.samples_written,
            "session finished"
        );
        Ok(stats)
    }

    fn flush_chunk(
        &self,
        pending: &mut Vec<Call>,
        sink: &mut dyn SampleSink,
        stats: &mut SessionStats,
    ) -> HilligossResult<()> {
        let calls = std::mem::take(pending);
        let buffers = match &self.pool {
            Some(pool) => pool.install(|| {
                calls
                    .par_iter()
                    .map(|call| self.trace_call(call))
                    .collect::<Vec<_>>()
            }),
            None => calls.iter().map(|call| self.trace_call(call)).collect(),
        };

        for (call, samples) in calls.iter().zip(&buffers) {
            for _ in 0..self.opts.sync_count {
                sink.push_frame(call.frame, samples)?;
                stats.samples_written += samples.len() as u64;
            }
        }
        stats.calls += calls.len() as u64;
        tracing::debug!(calls = calls.len(), "chunk flushed");
        Ok(())
    }

    fn trace_call(&self, call: &Call) -> Vec<i16> {
        let mut out = Vec::with_capacity(self.params.output_len());
        let seed = frame_seed(self.opts.seed, call.frame);
        trace_frame_seeded(&call.grid, &self.params, call.frame, seed, &mut out);
        out
    }
}

fn build_thread_pool(threads: Option<usize>) -> HilligossResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HilligossError::validation(
            "session 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/session/trace_session.rs"]
mod tests;
