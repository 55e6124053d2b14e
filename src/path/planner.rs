use rand::Rng;

use crate::foundation::core::{GRID_SIDE, GridPoint};
use crate::path::occupancy::Occupancy;
use crate::pipeline::params::TraceParams;

/// Ordered visiting sequence through the selected points, grouped into strokes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlannedPath {
    /// Points in visiting order.
    pub points: Vec<GridPoint>,
    stroke_starts: Vec<usize>,
}

impl PlannedPath {
    /// Number of points on the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of strokes.
    pub fn stroke_count(&self) -> usize {
        self.stroke_starts.len()
    }

    /// Each stroke as a contiguous slice of `points`.
    pub fn strokes(&self) -> impl Iterator<Item = &[GridPoint]> + '_ {
        self.stroke_starts.iter().enumerate().map(|(i, &start)| {
            let end = self
                .stroke_starts
                .get(i + 1)
                .copied()
                .unwrap_or(self.points.len());
            &self.points[start..end]
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlannerState {
    SelectingStart,
    ExtendingStroke { stroke_len: usize },
    Done,
}

/// Order `points` into strokes with a windowed greedy nearest-neighbor walk.
///
/// Each stroke starts at a uniformly random unvisited point and repeatedly steps to the closest
/// unvisited point inside the `search_distance` window around the tip, until the stroke holds
/// `jump_period` points or the window is empty. Planning stops once `target_count` points are
/// placed or every point is visited, so the path can be shorter than the target.
#[tracing::instrument(skip_all, fields(points = points.len()))]
pub fn plan_path<R: Rng + ?Sized>(
    points: &[GridPoint],
    params: &TraceParams,
    rng: &mut R,
) -> PlannedPath {
    if points.is_empty() {
        return PlannedPath {
            points: vec![GridPoint::center()],
            stroke_starts: vec![0],
        };
    }

    let target = params.target_count;
    let jump_period = params.jump_period.max(1);
    let reach = params.effective_search_distance();

    let mut occ = Occupancy::from_points(points);
    let mut path = Vec::with_capacity(target.min(occ.len()));
    let mut stroke_starts = Vec::new();
    let mut state = PlannerState::SelectingStart;

    loop {
        state = match state {
            PlannerState::SelectingStart => {
                if path.len() >= target {
                    PlannerState::Done
                } else if let Some(cell) = occ.take_random(rng) {
                    stroke_starts.push(path.len());
                    path.push(GridPoint::from_cell(cell));
                    PlannerState::ExtendingStroke { stroke_len: 1 }
                } else {
                    PlannerState::Done
                }
            }
            PlannerState::ExtendingStroke { stroke_len } => {
                if stroke_len >= jump_period || path.len() >= target {
                    PlannerState::SelectingStart
                } else {
                    let tip = path[path.len() - 1];
                    match nearest_in_window(&occ, tip, reach) {
                        Some(cell) => {
                            occ.remove(cell);
                            path.push(GridPoint::from_cell(cell));
                            PlannerState::ExtendingStroke {
                                stroke_len: stroke_len + 1,
                            }
                        }
                        None => PlannerState::SelectingStart,
                    }
                }
            }
            PlannerState::Done => break,
        };
    }

    tracing::debug!(
        path_len = path.len(),
        strokes = stroke_starts.len(),
        unvisited = occ.len(),
        "path planned"
    );
    PlannedPath {
        points: path,
        stroke_starts,
    }
}

/// Closest occupied cell in `[tip - reach, tip + reach)` on both axes, excluding the tip.
///
/// Ties go to the smallest row-major cell index. When fewer points remain than the window has
/// cells, the remaining-point list is scanned instead of the window; both scans agree.
fn nearest_in_window(occ: &Occupancy, tip: GridPoint, reach: usize) -> Option<usize> {
    let (tx, ty) = (usize::from(tip.x), usize::from(tip.y));
    let (x0, x1) = (tx.saturating_sub(reach), (tx + reach).min(GRID_SIDE));
    let (y0, y1) = (ty.saturating_sub(reach), (ty + reach).min(GRID_SIDE));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    let tip_cell = tip.cell();
    let mut best: Option<(u32, usize)> = None;

    if occ.len() < (x1 - x0) * (y1 - y0) {
        for cell in occ.cells() {
            let p = GridPoint::from_cell(cell);
            let (px, py) = (usize::from(p.x), usize::from(p.y));
            if cell == tip_cell || px < x0 || px >= x1 || py < y0 || py >= y1 {
                continue;
            }
            let d2 = p.distance_sq(tip);
            if best.is_none_or(|(bd, bc)| d2 < bd || (d2 == bd && cell < bc)) {
                best = Some((d2, cell));
            }
        }
    } else {
        for y in y0..y1 {
            for x in x0..x1 {
                let cell = y * GRID_SIDE + x;
                if cell == tip_cell || !occ.contains(cell) {
                    continue;
                }
                let d2 = GridPoint::from_cell(cell).distance_sq(tip);
                if best.is_none_or(|(bd, _)| d2 < bd) {
                    best = Some((d2, cell));
                }
            }
        }
    }
    best.map(|(_, cell)| cell)
}

#[cfg(test)]
#[path = "../../tests/unit/path/planner.rs"]
mod tests;
