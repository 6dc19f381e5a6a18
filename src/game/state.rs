use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    pub fn is_in_bounds(&self, board_size: usize) -> bool {
        let size = board_size as i32;
        self.row >= 0 && self.row < size && self.col >= 0 && self.col < size
    }

    /// Row-major index; only meaningful for in-bounds positions
    pub fn index(&self, board_size: usize) -> usize {
        self.row as usize * board_size + self.col as usize
    }

    pub fn from_index(index: usize, board_size: usize) -> Self {
        Self::new((index / board_size) as i32, (index % board_size) as i32)
    }

    /// Direction of a single orthogonal step from self to other
    pub fn direction_to(&self, other: Position) -> Option<Direction> {
        Direction::from_delta(other.row - self.row, other.col - self.col)
    }
}

/// Contents of one board square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    /// Body segment, tagged with the direction the snake moved when it was laid down
    Body(Direction),
    Apple,
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Win,
    Loss,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Continue)
    }
}
