use super::*;

#[test]
fn at_or_below_black_weighs_nothing() {
    let t = WeightTable::new(30, 230, 30.0, 1.0);
    for i in 0..=30u8 {
        assert_eq!(t.weight(i), 0.0);
    }
    assert!(t.weight(31) > 0.0);
}

#[test]
fn linear_curve_hits_255_at_white() {
    let t = WeightTable::new(0, 255, 0.0, 0.0);
    assert!((t.weight(255) - 255.0).abs() < 1e-9);
    assert!((t.weight(51) - 51.0).abs() < 1e-9);
}

#[test]
fn weights_are_monotonic_and_capped() {
    for &(boost, curve) in &[(30.0, 1.0), (0.0, -2.0), (200.0, 2.0), (900.0, 0.5), (-50.0, 0.0)] {
        let t = WeightTable::new(20, 60, boost, curve);
        let w = t.as_slice();
        for i in 21..255 {
            assert!(w[i + 1] >= w[i], "boost={boost} curve={curve} i={i}");
        }
        assert!(w.iter().all(|&v| (0.0..=MAX_WEIGHT).contains(&v)));
    }
}

#[test]
fn steeper_curve_lowers_midtones() {
    let flat = WeightTable::new(0, 255, 0.0, 0.0);
    let steep = WeightTable::new(0, 255, 0.0, 2.0);
    assert!(steep.weight(128) < flat.weight(128));
}

#[test]
fn degenerate_thresholds_do_not_divide_by_zero() {
    let t = WeightTable::new(100, 100, 30.0, 1.0);
    assert_eq!(t.weight(101), MAX_WEIGHT);
    assert!(t.as_slice().iter().all(|v| v.is_finite()));
}
