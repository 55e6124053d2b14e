//! Hilligoss turns grayscale images into stereo X/Y audio for oscilloscope vector displays.
//!
//! One conversion runs three stages over a 512x512 [`Grid`]:
//!
//! - [`choose_pixels`] picks points with probability rising with brightness
//! - [`plan_path`] orders them into short strokes by windowed nearest-neighbor search
//! - [`emit_path_samples`] and [`emit_border`] turn the path into interleaved `i16` samples
//!
//! [`trace_frame`] chains the three. [`TraceSession`] streams many frames from a
//! [`FrameSource`] into a [`SampleSink`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod emit;
pub(crate) mod encode;
pub(crate) mod path;
pub(crate) mod pipeline;
pub(crate) mod select;
pub(crate) mod session;
pub(crate) mod source;

pub use crate::foundation::core::{
    FrameIndex, GRID_CELLS, GRID_SIDE, Grid, GridPoint, frame_seed,
};
pub use crate::foundation::error::{HilligossError, HilligossResult};

pub use crate::emit::amplitude::point_to_sample;
pub use crate::emit::border::emit_border;
pub use crate::emit::stretch::emit_path_samples;
pub use crate::encode::pcm::PcmSink;
pub use crate::encode::sink::{InMemorySink, SampleSink, SinkConfig};
pub use crate::encode::sink_for_path;
pub use crate::encode::wav::WavSink;
pub use crate::path::planner::{PlannedPath, plan_path};
pub use crate::pipeline::params::TraceParams;
pub use crate::pipeline::trace::{TraceStats, trace_frame, trace_frame_seeded};
pub use crate::select::mode::{ModeTuning, SamplingMode};
pub use crate::select::selector::{Selection, choose_pixels};
pub use crate::select::weights::{MAX_WEIGHT, WeightTable};
pub use crate::session::trace_session::{
    SessionOpts, SessionStats, TraceSession, target_count_for,
};
pub use crate::source::FrameSource;
pub use crate::source::still::{
    ImageSequenceSource, StillImageSource, decode_grid, letterbox_gray, load_grid,
};
pub use crate::source::video::{FfmpegVideoSource, is_ffmpeg_on_path};
