use rand::SeedableRng;
use rand_pcg::Pcg64;

use super::*;

#[test]
fn duplicates_collapse() {
    let p = GridPoint::new(4, 4);
    let occ = Occupancy::from_points(&[p, p, GridPoint::new(1, 2), p]);
    assert_eq!(occ.len(), 2);
    assert!(occ.contains(p.cell()));
}

#[test]
fn remove_keeps_slots_consistent() {
    let pts: Vec<_> = (0..10).map(|i| GridPoint::new(i, i)).collect();
    let mut occ = Occupancy::from_points(&pts);
    assert!(occ.remove(pts[0].cell()));
    assert!(!occ.remove(pts[0].cell()));
    assert!(occ.remove(pts[9].cell()));
    assert!(occ.remove(pts[4].cell()));
    assert_eq!(occ.len(), 7);
    for (i, p) in pts.iter().enumerate() {
        assert_eq!(occ.contains(p.cell()), ![0, 4, 9].contains(&i));
    }
    let mut rest: Vec<_> = occ.cells().collect();
    rest.sort_unstable();
    let mut expected: Vec<_> = [1, 2, 3, 5, 6, 7, 8].iter().map(|&i| pts[i].cell()).collect();
    expected.sort_unstable();
    assert_eq!(rest, expected);
}

#[test]
fn take_random_drains_each_cell_once() {
    let pts: Vec<_> = (0..50).map(|i| GridPoint::new(i * 3, 7)).collect();
    let mut occ = Occupancy::from_points(&pts);
    let mut rng = Pcg64::seed_from_u64(11);
    let mut taken = Vec::new();
    while let Some(c) = occ.take_random(&mut rng) {
        taken.push(c);
    }
    assert!(occ.is_empty());
    taken.sort_unstable();
    taken.dedup();
    assert_eq!(taken.len(), 50);
}
