use crate::foundation::error::{HilligossError, HilligossResult};

/// Side length of the square raster every pipeline call works on.
pub const GRID_SIDE: usize = 512;

/// Number of cells in a [`Grid`].
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Index of one pipeline call within a multi-frame render.
///
/// Also the `frameNumber` phase fed to the scrolling-grid sampling modes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Integer cell coordinate on the grid. `x` is the column, `y` the row (row 0 at the top).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridPoint {
    /// Column, `0..512`.
    pub x: u16,
    /// Row, `0..512`.
    pub y: u16,
}

impl GridPoint {
    /// Point at column `x`, row `y`.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Sentinel used when an image has nothing above the black threshold.
    pub const fn center() -> Self {
        Self {
            x: (GRID_SIDE / 2) as u16,
            y: (GRID_SIDE / 2) as u16,
        }
    }

    /// Row-major cell index.
    pub fn cell(self) -> usize {
        usize::from(self.y) * GRID_SIDE + usize::from(self.x)
    }

    /// Inverse of [`GridPoint::cell`].
    pub fn from_cell(cell: usize) -> Self {
        Self {
            x: (cell % GRID_SIDE) as u16,
            y: ((cell / GRID_SIDE) % GRID_SIDE) as u16,
        }
    }

    /// Squared Euclidean distance in cells.
    pub fn distance_sq(self, other: Self) -> u32 {
        let dx = u32::from(self.x.abs_diff(other.x));
        let dy = u32::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }
}

/// Immutable 8-bit grayscale raster, `GRID_SIDE` x `GRID_SIDE`, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    luma: Vec<u8>,
}

impl Grid {
    /// Wrap a caller buffer. Fails unless it holds exactly [`GRID_CELLS`] bytes.
    pub fn from_bytes(luma: Vec<u8>) -> HilligossResult<Self> {
        if luma.len() != GRID_CELLS {
            return Err(HilligossError::validation(format!(
                "grid buffer must be {GRID_SIDE}x{GRID_SIDE} ({GRID_CELLS} bytes), got {} bytes",
                luma.len()
            )));
        }
        Ok(Self { luma })
    }

    /// A grid with every cell set to `value`.
    pub fn filled(value: u8) -> Self {
        Self {
            luma: vec![value; GRID_CELLS],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(mut f: impl FnMut(u16, u16) -> u8) -> Self {
        let mut luma = Vec::with_capacity(GRID_CELLS);
        for y in 0..GRID_SIDE as u16 {
            for x in 0..GRID_SIDE as u16 {
                luma.push(f(x, y));
            }
        }
        Self { luma }
    }

    /// Intensity at `p`.
    pub fn at(&self, p: GridPoint) -> u8 {
        self.luma[p.cell()]
    }

    /// Intensity at a row-major cell index.
    pub fn at_cell(&self, cell: usize) -> u8 {
        self.luma[cell]
    }

    /// Row-major intensities.
    pub fn as_bytes(&self) -> &[u8] {
        &self.luma
    }

    /// Give back the row-major buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.luma
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.luma.iter().filter(|&&v| v > 0).count();
        f.debug_struct("Grid")
            .field("side", &GRID_SIDE)
            .field("nonzero_cells", &lit)
            .finish()
    }
}

/// Derive an independent RNG seed for call `index` of a render seeded with `base`.
///
/// Each pipeline call owns its own generator; deriving seeds up front keeps parallel and
/// sequential renders byte-identical.
pub fn frame_seed(base: u64, index: FrameIndex) -> u64 {
    // SplitMix64 finalizer over the mixed pair.
    let mut z = base ^ index.0.wrapping_mul(0xD6E8_FEB8_6659_FD93);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
