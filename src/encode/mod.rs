//! Sample sinks: where interleaved stereo `i16` buffers go once traced.

pub(crate) mod pcm;
pub(crate) mod sink;
pub(crate) mod wav;

use std::path::Path;

use crate::encode::pcm::PcmSink;
use crate::encode::sink::SampleSink;
use crate::encode::wav::WavSink;

/// Pick a file sink by extension: `.wav` gets a RIFF header, anything else is raw `s16le`.
pub fn sink_for_path(path: &Path) -> Box<dyn SampleSink> {
    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
    if is_wav {
        Box::new(WavSink::new(path))
    } else {
        Box::new(PcmSink::new(path))
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> crate::HilligossResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
