use crate::foundation::core::{GRID_SIDE, GridPoint};

const AMP_STEP: i32 = 65536 / GRID_SIDE as i32;

/// Map a grid point to an `(x, y)` stereo sample pair.
///
/// Left is `x * 65536/N - 32768`. Right is `-(y * 65536/N) - 32768`, taken modulo 2^16 so the
/// vertical axis is flipped for display: row 0 lands on -32768 and row `y >= 1` on
/// `32768 - 128 * y`.
pub fn point_to_sample(p: GridPoint) -> [i16; 2] {
    let x = i32::from(p.x) * AMP_STEP - 32768;
    let y = -(i32::from(p.y) * AMP_STEP) - 32768;
    [x as i16, y as i16]
}

#[cfg(test)]
#[path = "../../tests/unit/emit/amplitude.rs"]
mod tests;
