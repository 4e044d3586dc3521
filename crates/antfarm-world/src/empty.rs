//! Index of unoccupied cells.
//!
//! Membership, insertion, removal, and uniform sampling are all constant
//! time. Members live in a dense vector; a per-cell slot table records each
//! member's position in that vector so removal can swap the last member into
//! the hole.
//!
//! Iteration order depends on the history of insertions and removals, not
//! on coordinates. It is fully determined by the sequence of grid
//! operations, so seeded sampling stays reproducible.

use antfarm_types::Position;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::grid::cell_index;

/// The set of cells with no occupants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCells {
    /// Grid width, for mapping positions to slots.
    width: u32,
    /// Grid height, for mapping positions to slots.
    height: u32,
    /// Dense list of empty positions.
    members: Vec<Position>,
    /// Per-cell index into `members`, `None` when the cell is occupied.
    slots: Vec<Option<usize>>,
}

impl EmptyCells {
    /// Build an index in which every cell of a `width` x `height` grid is empty.
    ///
    /// `positions` must enumerate the grid in cell-index order.
    pub(crate) fn full(width: u32, height: u32, positions: Vec<Position>) -> Self {
        let slots = (0..positions.len()).map(Some).collect();
        Self {
            width,
            height,
            members: positions,
            slots,
        }
    }

    /// Number of empty cells.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether every cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `pos` is an empty cell. Out-of-range positions are never empty.
    pub fn contains(&self, pos: Position) -> bool {
        cell_index(self.width, self.height, pos)
            .and_then(|cell| self.slots.get(cell))
            .is_some_and(Option::is_some)
    }

    /// Iterate over the empty cells.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.members.iter().copied()
    }

    /// Pick an empty cell uniformly at random.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        self.members.choose(rng).copied()
    }

    /// Mark the cell at `cell` (holding `pos`) as empty. No-op if it already is.
    pub(crate) fn insert(&mut self, cell: usize, pos: Position) {
        let Some(slot) = self.slots.get_mut(cell) else {
            return;
        };
        if slot.is_some() {
            return;
        }
        *slot = Some(self.members.len());
        self.members.push(pos);
    }

    /// Mark the cell at `cell` as occupied. No-op if it already is.
    pub(crate) fn remove(&mut self, cell: usize) {
        let Some(member) = self.slots.get_mut(cell).and_then(Option::take) else {
            return;
        };
        if member >= self.members.len() {
            return;
        }
        self.members.swap_remove(member);
        // The former last member now lives at `member`; repoint its slot.
        let Some(&moved) = self.members.get(member) else {
            return;
        };
        if let Some(moved_slot) = cell_index(self.width, self.height, moved)
            .and_then(|moved_cell| self.slots.get_mut(moved_cell))
        {
            *moved_slot = Some(member);
        }
    }
}
