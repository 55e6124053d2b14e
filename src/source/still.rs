use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use image::GrayImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::{GRID_SIDE, Grid};
use crate::foundation::error::{HilligossError, HilligossResult};
use crate::source::FrameSource;

/// Fit `img` inside a black 512x512 canvas, preserving aspect ratio and centering it.
pub fn letterbox_gray(img: &GrayImage) -> HilligossResult<Grid> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(HilligossError::decode("image has zero width or height"));
    }
    let side = GRID_SIDE as u32;
    if (w, h) == (side, side) {
        return Grid::from_bytes(img.as_raw().clone());
    }

    let fit_h = (f64::from(side) * f64::from(h) / f64::from(w)) as u32;
    let (nw, nh) = if fit_h <= side {
        (side, fit_h.max(1))
    } else {
        (
            ((f64::from(side) * f64::from(w) / f64::from(h)) as u32).clamp(1, side),
            side,
        )
    };
    let resized = imageops::resize(img, nw, nh, FilterType::Triangle);

    let mut canvas = GrayImage::new(side, side);
    imageops::overlay(
        &mut canvas,
        &resized,
        i64::from((side - nw) / 2),
        i64::from((side - nh) / 2),
    );
    Grid::from_bytes(canvas.into_raw())
}

/// Decode encoded image bytes (any format the `image` crate reads) into a letterboxed grid.
pub fn decode_grid(bytes: &[u8]) -> HilligossResult<Grid> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| HilligossError::decode(format!("decode image from memory: {e}")))?;
    letterbox_gray(&img.to_luma8())
}

/// Read and decode an image file into a letterboxed grid.
pub fn load_grid(path: &Path) -> HilligossResult<Grid> {
    let img = image::open(path)
        .map_err(|e| HilligossError::decode(format!("open image '{}': {e}", path.display())))?;
    letterbox_gray(&img.to_luma8())
}

/// One still image yielded `repeat` times.
///
/// Repeating a still is how grid sampling modes build up full coverage over several calls.
#[derive(Debug)]
pub struct StillImageSource {
    grid: Grid,
    remaining: u64,
}

impl StillImageSource {
    /// Yield `grid` `repeat` times.
    pub fn new(grid: Grid, repeat: u64) -> Self {
        Self {
            grid,
            remaining: repeat,
        }
    }

    /// Load the image at `path` and yield it `repeat` times.
    pub fn open(path: &Path, repeat: u64) -> HilligossResult<Self> {
        Ok(Self::new(load_grid(path)?, repeat))
    }
}

impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> HilligossResult<Option<Grid>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(self.grid.clone()))
    }
}

/// Ordered list of image files, one frame each, decoded lazily.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    /// Frames from `paths`, in iteration order.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> HilligossResult<Option<Grid>> {
        match self.paths.pop_front() {
            Some(path) => load_grid(&path).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/still.rs"]
mod tests;
