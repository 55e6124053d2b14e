/// Append `border_samples` calibration pairs tracing the edge of the full output range.
///
/// The pairs walk the unit square top (left to right), right (top to bottom), bottom (right to
/// left), then left (bottom to top), each side getting `border_samples / 4` points and the left
/// side also taking the remainder. Coordinates in `[-1, 1]` are scaled by `i16::MAX`.
pub fn emit_border(border_samples: usize, out: &mut Vec<i16>) {
    if border_samples == 0 {
        return;
    }
    out.reserve(2 * border_samples);

    let per_side = border_samples / 4;
    let counts = [
        per_side,
        per_side,
        per_side,
        per_side + border_samples % 4,
    ];
    let scale = f64::from(i16::MAX);

    for (side, &count) in counts.iter().enumerate() {
        for i in 0..count {
            let t = i as f64 / count as f64;
            let along = -1.0 + 2.0 * t;
            let (x, y) = match side {
                0 => (along, 1.0),
                1 => (1.0, -along),
                2 => (-along, -1.0),
                _ => (-1.0, along),
            };
            out.push((x * scale).round() as i16);
            out.push((y * scale).round() as i16);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/border.rs"]
mod tests;
