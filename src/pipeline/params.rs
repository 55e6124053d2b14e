use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::GRID_SIDE;
use crate::foundation::error::{HilligossError, HilligossResult};
use crate::select::mode::SamplingMode;

/// Every knob of one image-to-samples conversion.
///
/// Loadable from JSON; missing fields take the stock defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceParams {
    /// Number of (x, y) pairs derived from the image.
    pub target_count: usize,
    /// Intensities at or below this are never sampled.
    pub black: u8,
    /// Upper end of the brightness response.
    pub white: u8,
    /// Maximum number of points per stroke, start point included.
    ///
    /// A stroke takes at most `jump_period - 1` neighbor steps, one fewer than the classic
    /// tool's `jumpCounter < jumpPeriod` loop; `1` gives single-point strokes.
    pub jump_period: usize,
    /// Half-width of the nearest-neighbor search window, in cells. `>= 512` is unbounded.
    pub search_distance: usize,
    /// Acceptance weight floor for pixels just above `black`.
    pub boost: f64,
    /// Log2 of the response exponent: `0` linear, `1` quadratic, negative flattens.
    pub curve: f64,
    /// Candidate ordering and greed schedule.
    pub mode: SamplingMode,
    /// Calibration samples appended after the image-derived samples.
    pub border_samples: usize,
    /// Sample dark regions instead of bright ones.
    pub invert: bool,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            target_count: 8000,
            black: 30,
            white: 230,
            jump_period: 100,
            search_distance: 30,
            boost: 30.0,
            curve: 1.0,
            mode: SamplingMode::Normal,
            border_samples: 0,
            invert: false,
        }
    }
}

impl TraceParams {
    /// Parse parameters from a JSON document.
    pub fn from_json_str(s: &str) -> HilligossResult<Self> {
        let params: Self = serde_json::from_str(s)
            .map_err(|e| HilligossError::validation(format!("invalid parameter json: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Read and parse a JSON parameter file.
    pub fn from_path(path: &Path) -> HilligossResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read parameter file '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Caller-side sanitization. The conversion core assumes these hold and never checks them.
    pub fn validate(&self) -> HilligossResult<()> {
        if self.target_count == 0 {
            return Err(HilligossError::validation("target_count must be > 0"));
        }
        if self.black >= self.white {
            return Err(HilligossError::validation(format!(
                "black ({}) must be below white ({})",
                self.black, self.white
            )));
        }
        if self.jump_period == 0 {
            return Err(HilligossError::validation("jump_period must be >= 1"));
        }
        if !self.boost.is_finite() || !self.curve.is_finite() {
            return Err(HilligossError::validation("boost and curve must be finite"));
        }
        Ok(())
    }

    /// Search half-width clamped to the grid; values past the edge cannot widen the window.
    pub fn effective_search_distance(&self) -> usize {
        self.search_distance.min(GRID_SIDE)
    }

    /// Length of the interleaved `i16` buffer one call appends.
    pub fn output_len(&self) -> usize {
        2 * (self.target_count + self.border_samples)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/params.rs"]
mod tests;
