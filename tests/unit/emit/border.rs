use super::*;

#[test]
fn eight_samples_trace_two_points_per_side() {
    let mut out = Vec::new();
    emit_border(8, &mut out);
    let pairs: Vec<(i16, i16)> = out.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    let m = i16::MAX;
    assert_eq!(
        pairs,
        vec![
            (-m, m),
            (0, m), // top, left to right
            (m, m),
            (m, 0), // right, top to bottom
            (m, -m),
            (0, -m), // bottom, right to left
            (-m, -m),
            (-m, 0), // left, bottom to top
        ]
    );
}

#[test]
fn remainder_goes_to_the_left_side_and_stays_in_range() {
    let mut out = Vec::new();
    emit_border(11, &mut out);
    assert_eq!(out.len(), 22);
    // Last 5 pairs are on the left edge.
    for c in out[12..].chunks_exact(2) {
        assert_eq!(c[0], -i16::MAX);
    }
    assert!(out.iter().all(|&v| v >= -i16::MAX));
}

#[test]
fn zero_border_appends_nothing() {
    let mut out = vec![1, 2];
    emit_border(0, &mut out);
    assert_eq!(out, vec![1, 2]);
}

#[test]
fn fewer_than_four_samples_all_land_on_the_left_side() {
    let mut out = Vec::new();
    emit_border(3, &mut out);
    assert_eq!(out.len(), 6);
    assert!(out.chunks_exact(2).all(|c| c[0] == -i16::MAX));
}
