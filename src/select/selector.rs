use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::{FrameIndex, Grid, GridPoint};
use crate::pipeline::params::TraceParams;
use crate::select::weights::WeightTable;

const INITIAL_GREED: f64 = 0.8;

/// Outcome of pixel selection.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Exactly `target_count` points; accepted points first, then padding.
    pub points: Vec<GridPoint>,
    /// How many leading entries of `points` were accepted from the image.
    pub accepted: usize,
    /// `true` when nothing was above the black threshold and the center sentinel was used.
    pub used_sentinel: bool,
    /// Greed multiplier when the loop ended.
    pub final_greed: f64,
    /// `true` when the greed circuit breaker stopped the loop.
    pub hit_greed_cap: bool,
}

impl Selection {
    /// Points accepted from the image, before padding.
    pub fn accepted_points(&self) -> &[GridPoint] {
        &self.points[..self.accepted]
    }
}

/// Pick `params.target_count` grid points, brighter pixels more likely.
///
/// Candidates are shuffled once, then scanned with a random stride; each inspection draws a
/// fresh threshold in `[0, white)` and accepts when `weight * greed` beats it. `greed` grows each
/// time the scan wraps so strict thresholds still terminate. The result is always exactly
/// `target_count` long.
#[tracing::instrument(skip(grid, params, rng), fields(target = params.target_count))]
pub fn choose_pixels<R: Rng + ?Sized>(
    grid: &Grid,
    params: &TraceParams,
    frame: FrameIndex,
    rng: &mut R,
) -> Selection {
    let target = params.target_count;
    let tuning = params.mode.tuning();
    let table = WeightTable::new(params.black, params.white, params.boost, params.curve);
    let threshold_steps = 10 * u32::from(params.white.max(1));
    let intensity = |cell: u32| {
        let v = grid.at_cell(cell as usize);
        if params.invert { 255 - v } else { v }
    };

    let mut candidates = params.mode.candidates(frame);
    candidates.shuffle(rng);

    let mut points = Vec::with_capacity(target);
    let mut greed = INITIAL_GREED;
    let mut hit_greed_cap = false;
    let mut index = 0usize;

    while points.len() < target && !candidates.is_empty() {
        let needed = target - points.len();
        if candidates.len() < needed {
            // The pool cannot satisfy the request anyway: take everything still eligible.
            points.extend(
                candidates
                    .iter()
                    .filter(|&&c| intensity(c) > params.black)
                    .map(|&c| GridPoint::from_cell(c as usize)),
            );
            candidates.clear();
            break;
        }

        let z = f64::from(rng.gen_range(0..threshold_steps)) * 0.1;
        let cell = candidates[index];
        let v = intensity(cell);
        if v <= params.black {
            candidates.swap_remove(index);
        } else if table.weight(v) * greed > z {
            points.push(GridPoint::from_cell(cell as usize));
            candidates.swap_remove(index);
        }

        index += rng.gen_range(1..=tuning.max_stride);
        if index >= candidates.len() {
            greed *= tuning.greed_growth;
            if greed > tuning.greed_cap {
                hit_greed_cap = true;
                break;
            }
            index %= candidates.len().max(1);
        }
    }
    points.truncate(target);

    let accepted = points.len();
    let used_sentinel = accepted == 0 && target > 0;
    if used_sentinel {
        tracing::warn!("no pixel above black threshold; using center sentinel");
        points.push(GridPoint::center());
    }
    if hit_greed_cap {
        tracing::warn!(accepted, target, greed, "selection stopped at greed cap");
    }

    let seed_len = points.len();
    let mut i = 0;
    while points.len() < target && seed_len > 0 {
        points.push(points[i % seed_len]);
        i += 1;
    }

    tracing::debug!(accepted, greed, "pixels chosen");
    Selection {
        points,
        accepted,
        used_sentinel,
        final_greed: greed,
        hit_greed_cap,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/selector.rs"]
mod tests;
