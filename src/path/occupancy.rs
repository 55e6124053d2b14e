use rand::Rng;

use crate::foundation::core::{GRID_CELLS, GridPoint};

const EMPTY: u32 = u32::MAX;

/// Set of not-yet-visited grid cells.
///
/// A dense cell-to-slot table answers "is this cell still occupied" in O(1); the packed slot
/// list supports uniform random picks and O(1) swap-removal. Duplicate inserts collapse into a
/// single cell.
#[derive(Clone)]
pub struct Occupancy {
    slot_of: Vec<u32>,
    cells: Vec<u32>,
}

impl Occupancy {
    pub fn from_points(points: &[GridPoint]) -> Self {
        let mut occ = Self {
            slot_of: vec![EMPTY; GRID_CELLS],
            cells: Vec::with_capacity(points.len()),
        };
        for &p in points {
            occ.insert(p.cell());
        }
        occ
    }

    fn insert(&mut self, cell: usize) {
        if self.slot_of[cell] != EMPTY {
            return;
        }
        self.slot_of[cell] = self.cells.len() as u32;
        self.cells.push(cell as u32);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: usize) -> bool {
        self.slot_of[cell] != EMPTY
    }

    /// Remove `cell`; returns `false` when it was not present.
    pub fn remove(&mut self, cell: usize) -> bool {
        let slot = self.slot_of[cell];
        if slot == EMPTY {
            return false;
        }
        self.slot_of[cell] = EMPTY;
        self.cells.swap_remove(slot as usize);
        if let Some(&moved) = self.cells.get(slot as usize) {
            self.slot_of[moved as usize] = slot;
        }
        true
    }

    /// Remove and return a uniformly random remaining cell.
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let cell = self.cells[rng.gen_range(0..self.cells.len())] as usize;
        self.remove(cell);
        Some(cell)
    }

    /// Remaining cells in arbitrary order.
    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().map(|&c| c as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/occupancy.rs"]
mod tests;
