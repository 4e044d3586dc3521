//! Toroidal multi-occupancy grid.
//!
//! The [`Grid`] owns the contents of every cell and is the only way to
//! change where an agent sits. Mutations take effect immediately: a query
//! issued after [`Grid::move_agent`] returns already sees the new placement.
//!
//! Cells are stored row-major. Besides the per-cell occupant sets the grid
//! keeps a reverse index from agent to position (so moves and removals do
//! not scan) and an [`EmptyCells`] index (so "is this cell free" and "pick
//! a free cell" are constant time).

use std::collections::{BTreeMap, BTreeSet};

use antfarm_types::{AgentId, Position};
use rand::Rng;
use tracing::trace;

use crate::empty::EmptyCells;
use crate::error::WorldError;

/// Moore neighborhood offsets in row-major order: top row left to right,
/// then the middle row, then the bottom row.
const MOORE_OFFSETS: [(i64, i64); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Map a position to its row-major cell index, or `None` if it is off-grid.
pub(crate) fn cell_index(width: u32, height: u32, pos: Position) -> Option<usize> {
    if pos.x >= width || pos.y >= height {
        return None;
    }
    let row = usize::try_from(pos.y).ok()?;
    let stride = usize::try_from(width).ok()?;
    let col = usize::try_from(pos.x).ok()?;
    row.checked_mul(stride)?.checked_add(col)
}

/// Fixed-size toroidal grid mapping cells to the agents that occupy them.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Number of columns.
    width: u32,
    /// Number of rows.
    height: u32,
    /// Occupant set per cell, row-major.
    cells: Vec<BTreeSet<AgentId>>,
    /// Reverse index: agent -> current cell.
    placements: BTreeMap<AgentId, Position>,
    /// Cells with no occupants.
    empty: EmptyCells,
}

impl Grid {
    /// Create an empty `width` x `height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero
    /// or the cell count does not fit in memory indices.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        let invalid = WorldError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let cell_count = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(invalid)?;

        let positions: Vec<Position> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .collect();

        Ok(Self {
            width,
            height,
            cells: vec![BTreeSet::new(); cell_count],
            placements: BTreeMap::new(),
            empty: EmptyCells::full(width, height, positions),
        })
    }

    /// Number of columns.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `pos` lies on the grid.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The home cell: the grid center, rounded toward the lower index when a
    /// dimension is even.
    pub const fn center(&self) -> Position {
        Position::new(
            self.width.saturating_sub(1) / 2,
            self.height.saturating_sub(1) / 2,
        )
    }

    // -------------------------------------------------------------------
    // Wraparound arithmetic
    // -------------------------------------------------------------------

    /// Wrap arbitrary signed coordinates onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        Position::new(
            wrap_axis(x, self.width),
            wrap_axis(y, self.height),
        )
    }

    /// The cell reached by stepping `(dx, dy)` from `pos`, wrapping at edges.
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Position {
        self.wrap(
            i64::from(pos.x).saturating_add(dx),
            i64::from(pos.y).saturating_add(dy),
        )
    }

    /// Moore (8-connected) neighborhood of `pos` with wraparound.
    ///
    /// Positions come back in row-major offset order and without duplicates
    /// (on grids narrower than three cells several offsets wrap onto the
    /// same cell). The center is included only when `include_center` is
    /// set; a wrapped offset landing on the center is dropped otherwise.
    pub fn neighborhood(&self, pos: Position, include_center: bool) -> Vec<Position> {
        let mut seen = BTreeSet::new();
        MOORE_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| include_center || (dx, dy) != (0, 0))
            .map(|&(dx, dy)| self.offset(pos, dx, dy))
            .filter(|candidate| include_center || *candidate != pos)
            .filter(|candidate| seen.insert(*candidate))
            .collect()
    }

    // -------------------------------------------------------------------
    // Occupancy queries
    // -------------------------------------------------------------------

    /// Agents currently in the cell at `pos`, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is off-grid.
    pub fn occupants(&self, pos: Position) -> Result<&BTreeSet<AgentId>, WorldError> {
        let cell = self.index(pos)?;
        self.cells.get(cell).ok_or_else(|| self.out_of_bounds(pos))
    }

    /// Agents in any of the given cells, cell by cell in input order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if any position is off-grid.
    pub fn occupants_of(&self, positions: &[Position]) -> Result<Vec<AgentId>, WorldError> {
        let mut found = Vec::new();
        for &pos in positions {
            found.extend(self.occupants(pos)?.iter().copied());
        }
        Ok(found)
    }

    /// Whether the cell at `pos` has no occupants.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is off-grid.
    pub fn is_empty(&self, pos: Position) -> Result<bool, WorldError> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos));
        }
        Ok(self.empty.contains(pos))
    }

    /// The index of unoccupied cells.
    pub const fn empty_cells(&self) -> &EmptyCells {
        &self.empty
    }

    /// Where `agent` currently sits, if it is placed.
    pub fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.placements.get(&agent).copied()
    }

    /// Number of agents placed on the grid.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Iterate over every cell with its occupants, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &BTreeSet<AgentId>)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
            .zip(self.cells.iter())
    }

    /// Pick an empty cell uniformly at random.
    pub fn random_empty<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        self.empty.sample(rng)
    }

    /// Pick any cell uniformly at random.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    // -------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------

    /// Put `agent` into the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is off-grid, or
    /// [`WorldError::AgentAlreadyPlaced`] if the agent already has a cell.
    pub fn place(&mut self, agent: AgentId, pos: Position) -> Result<(), WorldError> {
        if let Some(&position) = self.placements.get(&agent) {
            return Err(WorldError::AgentAlreadyPlaced { agent, position });
        }
        self.insert_into_cell(agent, pos)?;
        self.placements.insert(agent, pos);
        trace!(%agent, %pos, "placed");
        Ok(())
    }

    /// Move `agent` from its current cell to `new_pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotPlaced`] if the agent has no cell, or
    /// [`WorldError::OutOfBounds`] if `new_pos` is off-grid. The agent stays
    /// where it was on error.
    pub fn move_agent(&mut self, agent: AgentId, new_pos: Position) -> Result<(), WorldError> {
        let Some(&old_pos) = self.placements.get(&agent) else {
            return Err(WorldError::AgentNotPlaced(agent));
        };
        if !self.contains(new_pos) {
            return Err(self.out_of_bounds(new_pos));
        }
        if old_pos == new_pos {
            return Ok(());
        }
        self.remove_from_cell(agent, old_pos)?;
        self.insert_into_cell(agent, new_pos)?;
        self.placements.insert(agent, new_pos);
        trace!(%agent, from = %old_pos, to = %new_pos, "moved");
        Ok(())
    }

    /// Take `agent` off the grid, returning the cell it was in.
    ///
    /// Removing an agent that is not placed is a no-op and returns `None`.
    pub fn remove(&mut self, agent: AgentId) -> Option<Position> {
        let pos = self.placements.remove(&agent)?;
        // The placement index only ever holds in-range positions.
        if self.remove_from_cell(agent, pos).is_err() {
            return None;
        }
        trace!(%agent, %pos, "removed");
        Some(pos)
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn index(&self, pos: Position) -> Result<usize, WorldError> {
        cell_index(self.width, self.height, pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    const fn out_of_bounds(&self, position: Position) -> WorldError {
        WorldError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        }
    }

    fn insert_into_cell(&mut self, agent: AgentId, pos: Position) -> Result<(), WorldError> {
        let cell = self.index(pos)?;
        let occupants = self
            .cells
            .get_mut(cell)
            .ok_or(WorldError::OutOfBounds {
                position: pos,
                width: self.width,
                height: self.height,
            })?;
        occupants.insert(agent);
        self.empty.remove(cell);
        Ok(())
    }

    fn remove_from_cell(&mut self, agent: AgentId, pos: Position) -> Result<(), WorldError> {
        let cell = self.index(pos)?;
        let occupants = self
            .cells
            .get_mut(cell)
            .ok_or(WorldError::OutOfBounds {
                position: pos,
                width: self.width,
                height: self.height,
            })?;
        occupants.remove(&agent);
        if occupants.is_empty() {
            self.empty.insert(cell, pos);
        }
        Ok(())
    }
}

/// Wrap one signed coordinate into `0..len`.
fn wrap_axis(value: i64, len: u32) -> u32 {
    let wrapped = value.rem_euclid(i64::from(len.max(1)));
    // rem_euclid with a positive modulus is in 0..len, which fits in u32.
    u32::try_from(wrapped).unwrap_or(0)
}
