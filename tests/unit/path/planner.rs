use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg64;

use super::*;

fn params(target: usize, jump: usize, reach: usize) -> TraceParams {
    TraceParams {
        target_count: target,
        jump_period: jump,
        search_distance: reach,
        ..TraceParams::default()
    }
}

fn scatter(n: usize, seed: u64) -> Vec<GridPoint> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..n)
        .map(|_| GridPoint::new(rng.gen_range(0..512), rng.gen_range(0..512)))
        .collect()
}

#[test]
fn no_cell_is_visited_twice() {
    let pts = scatter(3000, 1);
    let path = plan_path(&pts, &params(3000, 50, 30), &mut Pcg64::seed_from_u64(2));
    let unique: HashSet<_> = pts.iter().copied().collect();
    assert_eq!(path.len(), unique.len());
    let visited: HashSet<_> = path.points.iter().copied().collect();
    assert_eq!(visited.len(), path.len());
    assert_eq!(visited, unique);
}

#[test]
fn zero_search_distance_makes_every_stroke_a_single_point() {
    let pts = scatter(400, 3);
    let path = plan_path(&pts, &params(400, 100, 0), &mut Pcg64::seed_from_u64(4));
    assert!(path.strokes().all(|s| s.len() == 1));
    assert_eq!(path.stroke_count(), path.len());
}

#[test]
fn jump_period_one_makes_every_stroke_a_single_point() {
    let pts = scatter(400, 5);
    let path = plan_path(&pts, &params(400, 1, 512), &mut Pcg64::seed_from_u64(6));
    assert!(path.strokes().all(|s| s.len() == 1));
}

#[test]
fn strokes_never_exceed_jump_period() {
    let pts = scatter(2000, 7);
    let path = plan_path(&pts, &params(2000, 9, 512), &mut Pcg64::seed_from_u64(8));
    assert!(path.strokes().all(|s| (1..=9).contains(&s.len())));
    assert_eq!(path.strokes().map(<[GridPoint]>::len).sum::<usize>(), path.len());
}

#[test]
fn stops_at_target_count() {
    let pts = scatter(1000, 9);
    let path = plan_path(&pts, &params(100, 30, 40), &mut Pcg64::seed_from_u64(10));
    assert_eq!(path.len(), 100);
}

#[test]
fn unit_reach_walks_a_line_leftwards() {
    // With reach 1 the window is [tip - 1, tip + 1): only the left neighbor qualifies.
    let pts: Vec<_> = (100..140).map(|x| GridPoint::new(x, 200)).collect();
    let path = plan_path(&pts, &params(40, 1000, 1), &mut Pcg64::seed_from_u64(12));
    assert_eq!(path.len(), 40);
    for stroke in path.strokes() {
        for w in stroke.windows(2) {
            assert_eq!(w[1].x + 1, w[0].x);
            assert_eq!(w[1].y, 200);
        }
    }
}

#[test]
fn window_is_half_open() {
    // Point exactly `reach` to the right lies outside [tip - reach, tip + reach).
    let pts = vec![GridPoint::new(10, 10), GridPoint::new(15, 10)];
    let mut occ = Occupancy::from_points(&pts);
    occ.remove(pts[0].cell());
    assert_eq!(nearest_in_window(&occ, pts[0], 5), None);
    assert_eq!(nearest_in_window(&occ, pts[0], 6), Some(pts[1].cell()));
    // To the left, `tip - reach` is inside.
    let pts = vec![GridPoint::new(15, 10), GridPoint::new(10, 10)];
    let mut occ = Occupancy::from_points(&pts);
    occ.remove(pts[0].cell());
    assert_eq!(nearest_in_window(&occ, pts[0], 5), Some(pts[1].cell()));
}

#[test]
fn ties_go_to_first_row_major_cell_in_both_scans() {
    let tip = GridPoint::new(50, 50);
    let ring = vec![
        GridPoint::new(51, 50),
        GridPoint::new(49, 50),
        GridPoint::new(50, 51),
        GridPoint::new(50, 49),
    ];
    let expected = GridPoint::new(50, 49).cell();

    // Few points left: list scan.
    let sparse = Occupancy::from_points(&ring);
    assert_eq!(nearest_in_window(&sparse, tip, 10), Some(expected));

    // Many points left: window scan.
    let mut dense_pts = ring.clone();
    dense_pts.extend((0..512).map(|x| GridPoint::new(x, 500)));
    let dense = Occupancy::from_points(&dense_pts);
    assert!(dense.len() >= 4 * 4);
    assert_eq!(nearest_in_window(&dense, tip, 2), Some(expected));
}

#[test]
fn empty_input_yields_center_point() {
    let path = plan_path(&[], &params(10, 5, 5), &mut Pcg64::seed_from_u64(0));
    assert_eq!(path.points, vec![GridPoint::center()]);
    assert_eq!(path.stroke_count(), 1);
}

#[test]
fn duplicates_are_visited_once() {
    let p = GridPoint::new(7, 7);
    let path = plan_path(&[p, p, p], &params(3, 5, 5), &mut Pcg64::seed_from_u64(0));
    assert_eq!(path.points, vec![p]);
}
