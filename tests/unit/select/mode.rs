use super::*;
use crate::foundation::core::GRID_CELLS;

#[test]
fn index_roundtrip_and_rejects_out_of_range() {
    for i in 0..=SamplingMode::MAX_INDEX {
        assert_eq!(SamplingMode::from_index(i).unwrap().index(), i);
    }
    assert!(SamplingMode::from_index(7).is_err());
}

#[test]
fn grid_periods_are_powers_of_two() {
    let periods: Vec<_> = (3..=6)
        .map(|i| SamplingMode::from_index(i).unwrap().grid_period().unwrap())
        .collect();
    assert_eq!(periods, vec![2, 4, 8, 16]);
    assert_eq!(SamplingMode::Normal.grid_period(), None);
}

#[test]
fn normal_mode_every_cell_is_a_candidate() {
    let c = SamplingMode::Normal.candidates(FrameIndex(3));
    assert_eq!(c.len(), GRID_CELLS);
}

#[test]
fn grid_mode_candidates_follow_phase() {
    let mode = SamplingMode::from_index(4).unwrap(); // period 4
    let c = mode.candidates(FrameIndex(5)); // phase 1
    // Lines: 128 rows fully + 128 columns on the other 384 rows.
    assert_eq!(c.len(), 128 * 512 + 384 * 128);
    for &cell in &c {
        let (x, y) = (cell as usize % GRID_SIDE, cell as usize / GRID_SIDE);
        assert!(x % 4 == 1 || y % 4 == 1);
    }
}

#[test]
fn grid_mode_covers_every_cell_over_one_period() {
    let mode = SamplingMode::from_index(3).unwrap(); // period 2
    let mut seen = vec![false; GRID_CELLS];
    for f in 0..2 {
        for cell in mode.candidates(FrameIndex(f)) {
            seen[cell as usize] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn serde_uses_integer_form() {
    let json = serde_json::to_string(&SamplingMode::ScrollingGrid { period_log2: 3 }).unwrap();
    assert_eq!(json, "5");
    let back: SamplingMode = serde_json::from_str("1").unwrap();
    assert_eq!(back, SamplingMode::Sparkly);
    assert!(serde_json::from_str::<SamplingMode>("9").is_err());
}
