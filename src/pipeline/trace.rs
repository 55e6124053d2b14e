use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::emit::border::emit_border;
use crate::emit::stretch::emit_path_samples;
use crate::foundation::core::{FrameIndex, Grid};
use crate::path::planner::plan_path;
use crate::pipeline::params::TraceParams;
use crate::select::selector::choose_pixels;

/// Per-call diagnostics from [`trace_frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TraceStats {
    /// Points accepted from the image before padding.
    pub accepted: usize,
    /// The image had nothing above `black`.
    pub used_sentinel: bool,
    /// Selection ended at the greed circuit breaker.
    pub hit_greed_cap: bool,
    /// Length of the planned path before stretching.
    pub path_len: usize,
    /// Number of strokes on the planned path.
    pub strokes: usize,
}

/// Convert one grayscale grid into `params.output_len()` interleaved `i16` samples appended to
/// `dest`.
///
/// Runs selection, stroke planning, and emission in order. `rng` is owned by this call; give
/// each concurrent call its own. Never fails: degenerate inputs still produce a full-length
/// buffer.
#[tracing::instrument(skip_all, fields(frame = frame.0))]
pub fn trace_frame<R: Rng>(
    grid: &Grid,
    params: &TraceParams,
    frame: FrameIndex,
    mut rng: R,
    dest: &mut Vec<i16>,
) -> TraceStats {
    let selection = choose_pixels(grid, params, frame, &mut rng);
    let path = plan_path(&selection.points, params, &mut rng);

    dest.reserve(params.output_len());
    emit_path_samples(&path.points, params.target_count, dest);
    emit_border(params.border_samples, dest);

    TraceStats {
        accepted: selection.accepted,
        used_sentinel: selection.used_sentinel,
        hit_greed_cap: selection.hit_greed_cap,
        path_len: path.len(),
        strokes: path.stroke_count(),
    }
}

/// [`trace_frame`] with a `Pcg64` generator seeded from `seed`.
pub fn trace_frame_seeded(
    grid: &Grid,
    params: &TraceParams,
    frame: FrameIndex,
    seed: u64,
    dest: &mut Vec<i16>,
) -> TraceStats {
    trace_frame(grid, params, frame, Pcg64::seed_from_u64(seed), dest)
}
