use crate::foundation::core::{FrameIndex, GRID_SIDE};
use crate::foundation::error::{HilligossError, HilligossResult};

/// Sampling-pattern variant for pixel selection.
///
/// Serialized as the small integer the command line uses: `0` normal, `1` sparkly,
/// `2` extra sparkly, `3..=6` scrolling grid with a period of 2, 4, 8 or 16 cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SamplingMode {
    /// Every cell is eligible; dense scan stride.
    #[default]
    Normal,
    /// Every cell is eligible; wide scan stride and faster greed growth.
    Sparkly,
    /// Like [`SamplingMode::Sparkly`] with the most aggressive greed schedule.
    ExtraSparkly,
    /// Only cells on a grid line whose phase scrolls with the frame number are eligible.
    ScrollingGrid {
        /// Grid period is `1 << period_log2` cells (1..=4).
        period_log2: u8,
    },
}

/// Per-mode knobs of the rejection-sampling loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeTuning {
    /// Upper bound (inclusive) of the random scan-pointer stride.
    pub max_stride: usize,
    /// Factor applied to `greed` each time the scan wraps.
    pub greed_growth: f64,
    /// Selection stops early once `greed` exceeds this.
    pub greed_cap: f64,
}

impl SamplingMode {
    /// Highest accepted mode index.
    pub const MAX_INDEX: u8 = 6;

    /// Decode the integer form used on the command line and in JSON.
    pub fn from_index(index: u8) -> HilligossResult<Self> {
        match index {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Sparkly),
            2 => Ok(Self::ExtraSparkly),
            3..=Self::MAX_INDEX => Ok(Self::ScrollingGrid {
                period_log2: index - 2,
            }),
            _ => Err(HilligossError::validation(format!(
                "sampling mode must be in 0..={}, got {index}",
                Self::MAX_INDEX
            ))),
        }
    }

    /// Integer form of this mode.
    pub fn index(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Sparkly => 1,
            Self::ExtraSparkly => 2,
            Self::ScrollingGrid { period_log2 } => period_log2 + 2,
        }
    }

    /// Scan constants for this mode.
    pub fn tuning(self) -> ModeTuning {
        match self {
            Self::Normal => ModeTuning {
                max_stride: 32,
                greed_growth: 1.01,
                greed_cap: 2.0,
            },
            Self::Sparkly => ModeTuning {
                max_stride: GRID_SIDE,
                greed_growth: 1.02,
                greed_cap: 3.0,
            },
            Self::ExtraSparkly => ModeTuning {
                max_stride: GRID_SIDE,
                greed_growth: 1.05,
                greed_cap: 5.0,
            },
            Self::ScrollingGrid { .. } => ModeTuning {
                max_stride: 32,
                greed_growth: 1.05,
                greed_cap: 5.0,
            },
        }
    }

    /// Grid-line period for scrolling modes, `None` otherwise.
    pub fn grid_period(self) -> Option<usize> {
        match self {
            Self::ScrollingGrid { period_log2 } => Some(1usize << period_log2),
            _ => None,
        }
    }

    /// Row-major indices of the cells eligible for selection on call `frame`.
    ///
    /// In scrolling-grid modes a cell is eligible when its column or its row sits on the
    /// current phase (`frame mod period`), so `period` consecutive calls cover every cell.
    pub fn candidates(self, frame: FrameIndex) -> Vec<u32> {
        let Some(period) = self.grid_period() else {
            return (0..(GRID_SIDE * GRID_SIDE) as u32).collect();
        };
        let phase = (frame.0 % period as u64) as usize;

        let mut out = Vec::with_capacity(2 * GRID_SIDE * GRID_SIDE / period);
        for y in 0..GRID_SIDE {
            let row_on_line = y % period == phase;
            for x in 0..GRID_SIDE {
                if row_on_line || x % period == phase {
                    out.push((y * GRID_SIDE + x) as u32);
                }
            }
        }
        out
    }
}

impl TryFrom<u8> for SamplingMode {
    type Error = HilligossError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl From<SamplingMode> for u8 {
    fn from(mode: SamplingMode) -> Self {
        mode.index()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/mode.rs"]
mod tests;
