//! Set of vacant squares an apple may spawn on.
//!
//! Every board square has a slot in `positions`; slots `[0, vacant)` hold the
//! vacant squares and `slot_of` maps a square back to its slot, so picking,
//! removing and re-inserting are all constant time swaps.

use rand::Rng;

use super::state::Position;

#[derive(Debug, Clone)]
pub struct ApplePositionPool {
    board_size: usize,
    positions: Vec<Position>,
    slot_of: Vec<usize>,
    vacant: usize,
}

impl ApplePositionPool {
    /// Build the pool for a board, with `is_vacant` deciding the initial partition
    pub fn new(board_size: usize, is_vacant: impl Fn(Position) -> bool) -> Self {
        let cells = board_size * board_size;
        let all = (0..cells).map(|index| Position::from_index(index, board_size));
        let (free, taken): (Vec<Position>, Vec<Position>) = all.partition(|&pos| is_vacant(pos));

        let vacant = free.len();
        let positions: Vec<Position> = free.into_iter().chain(taken).collect();
        let mut slot_of = vec![0; cells];
        for (slot, pos) in positions.iter().enumerate() {
            slot_of[pos.index(board_size)] = slot;
        }

        Self {
            board_size,
            positions,
            slot_of,
            vacant,
        }
    }

    /// Number of vacant squares
    pub fn len(&self) -> usize {
        self.vacant
    }

    pub fn is_empty(&self) -> bool {
        self.vacant == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.slot_of[pos.index(self.board_size)] < self.vacant
    }

    pub fn vacant_positions(&self) -> &[Position] {
        &self.positions[..self.vacant]
    }

    /// Uniformly random vacant square; the pool itself is left untouched
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        if self.vacant == 0 {
            return None;
        }
        Some(self.positions[rng.gen_range(0..self.vacant)])
    }

    /// Mark a square occupied
    pub fn remove(&mut self, pos: Position) {
        let slot = self.slot_of[pos.index(self.board_size)];
        if slot >= self.vacant {
            return;
        }
        self.vacant -= 1;
        self.swap_slots(slot, self.vacant);
    }

    /// Mark a square vacant again
    pub fn insert(&mut self, pos: Position) {
        let slot = self.slot_of[pos.index(self.board_size)];
        if slot < self.vacant {
            return;
        }
        self.swap_slots(slot, self.vacant);
        self.vacant += 1;
    }

    /// One square became vacant while another became occupied on the same move.
    ///
    /// Trading their slots keeps the partition intact without touching the counter.
    pub fn swap_occupancy(&mut self, vacated: Position, occupied: Position) {
        let vacated_slot = self.slot_of[vacated.index(self.board_size)];
        let occupied_slot = self.slot_of[occupied.index(self.board_size)];
        if vacated_slot < self.vacant || occupied_slot >= self.vacant {
            // Not a clean trade; fall back to the individual updates
            self.insert(vacated);
            self.remove(occupied);
            return;
        }
        self.swap_slots(vacated_slot, occupied_slot);
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.positions.swap(a, b);
        let pos_a = self.positions[a];
        let pos_b = self.positions[b];
        self.slot_of[pos_a.index(self.board_size)] = a;
        self.slot_of[pos_b.index(self.board_size)] = b;
    }
}
