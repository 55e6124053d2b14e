use super::*;

fn pairs(buf: &[i16]) -> Vec<[i16; 2]> {
    buf.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

#[test]
fn exact_length_path_is_emitted_verbatim() {
    let path = [GridPoint::new(1, 1), GridPoint::new(2, 2)];
    let mut out = Vec::new();
    emit_path_samples(&path, 2, &mut out);
    assert_eq!(
        pairs(&out),
        vec![point_to_sample(path[0]), point_to_sample(path[1])]
    );
}

#[test]
fn repeats_are_spread_evenly() {
    let path: Vec<_> = (0..4).map(|i| GridPoint::new(i * 10, 5)).collect();
    let mut out = Vec::new();
    emit_path_samples(&path, 12, &mut out);
    let got = pairs(&out);
    assert_eq!(got.len(), 12);
    for (i, chunk) in got.chunks(3).enumerate() {
        let s = point_to_sample(path[i]);
        assert_eq!(chunk, &[s, s, s]);
    }
}

#[test]
fn uneven_ratio_keeps_order_and_length() {
    let path: Vec<_> = (0..7).map(|i| GridPoint::new(i, i)).collect();
    let mut out = Vec::new();
    emit_path_samples(&path, 20, &mut out);
    let got = pairs(&out);
    assert_eq!(got.len(), 20);
    // Non-decreasing path index, every point present, no run longer than ceil(20/7) = 3.
    let idx: Vec<usize> = got
        .iter()
        .map(|s| path.iter().position(|p| point_to_sample(*p) == *s).unwrap())
        .collect();
    assert!(idx.windows(2).all(|w| w[0] <= w[1]));
    for k in 0..7 {
        let run = idx.iter().filter(|&&i| i == k).count();
        assert!((2..=3).contains(&run), "point {k} repeated {run} times");
    }
}

#[test]
fn longer_path_is_truncated() {
    let path: Vec<_> = (0..10).map(|i| GridPoint::new(i, 0)).collect();
    let mut out = vec![7, 7];
    emit_path_samples(&path, 4, &mut out);
    assert_eq!(out.len(), 2 + 8);
    assert_eq!(&out[..2], &[7, 7]);
}

#[test]
fn empty_path_emits_center() {
    let mut out = Vec::new();
    emit_path_samples(&[], 3, &mut out);
    let c = point_to_sample(GridPoint::center());
    assert_eq!(pairs(&out), vec![c, c, c]);
}
