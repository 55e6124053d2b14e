//! Frame sources: turn files on disk into 512x512 grayscale [`Grid`](crate::Grid)s.

pub(crate) mod still;
pub(crate) mod video;

use crate::foundation::core::Grid;
use crate::foundation::error::HilligossResult;

/// Producer of grayscale frames in presentation order.
pub trait FrameSource: Send {
    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> HilligossResult<Option<Grid>>;

    /// Native frame rate, when the source knows one.
    fn fps_hint(&self) -> Option<f64> {
        None
    }
}
