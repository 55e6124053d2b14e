use crate::emit::amplitude::point_to_sample;
use crate::foundation::core::GridPoint;

/// Append exactly `target_count` interleaved sample pairs for `path` onto `out`.
///
/// A path shorter than the target is stretched: each point is repeated until the emitted count
/// catches up with a running `target / len` progress counter, spreading the repeats evenly.
/// Any shortfall left by rounding is filled by cycling the path from its start. Longer paths are
/// cut at the target.
pub fn emit_path_samples(path: &[GridPoint], target_count: usize, out: &mut Vec<i16>) {
    let center = [GridPoint::center()];
    let path = if path.is_empty() { &center[..] } else { path };
    out.reserve(2 * target_count);

    let mut emitted = 0usize;
    if path.len() >= target_count {
        for &p in &path[..target_count] {
            out.extend_from_slice(&point_to_sample(p));
        }
        return;
    }

    let ratio = target_count as f64 / path.len() as f64;
    let mut expected = 0.0f64;
    for &p in path {
        let sample = point_to_sample(p);
        out.extend_from_slice(&sample);
        emitted += 1;
        expected += ratio;
        while (emitted as f64) < expected && emitted < target_count {
            out.extend_from_slice(&sample);
            emitted += 1;
        }
        if emitted >= target_count {
            break;
        }
    }

    let mut i = 0;
    while emitted < target_count {
        out.extend_from_slice(&point_to_sample(path[i % path.len()]));
        emitted += 1;
        i += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/stretch.rs"]
mod tests;
