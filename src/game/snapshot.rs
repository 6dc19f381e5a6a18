//! Read-only copy of the board handed to the autoplayer and the renderers.
//!
//! Textual form is one row per line, one symbol per square: `H` head, `A`
//! apple, `X` empty, and an arrow for every body segment showing the way the
//! snake was travelling when the segment was laid down.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::action::Direction;
use super::state::{Cell, Position};

pub const HEAD_SYMBOL: char = 'H';
pub const APPLE_SYMBOL: char = 'A';
pub const EMPTY_SYMBOL: char = 'X';

impl Cell {
    pub fn symbol(&self) -> char {
        match self {
            Cell::Head => HEAD_SYMBOL,
            Cell::Apple => APPLE_SYMBOL,
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Body(direction) => direction.arrow(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            HEAD_SYMBOL => Some(Cell::Head),
            APPLE_SYMBOL => Some(Cell::Apple),
            EMPTY_SYMBOL => Some(Cell::Empty),
            other => Direction::from_arrow(other).map(Cell::Body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("board is not square: row {row} has {found} squares, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("expected {expected} squares, found {found}")]
    WrongLength { found: usize, expected: usize },

    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("expected exactly one head, found {found}")]
    HeadCount { found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    board_size: usize,
    cells: Vec<Cell>,
    head: Position,
    apple: Option<Position>,
    /// Body segments ordered from the neck to the tail
    body: Vec<Position>,
}

impl Snapshot {
    /// Assemble a snapshot from parts the engine already tracks
    pub(crate) fn from_parts(
        board_size: usize,
        cells: Vec<Cell>,
        head: Position,
        apple: Option<Position>,
        body: Vec<Position>,
    ) -> Self {
        Self {
            board_size,
            cells,
            head,
            apple,
            body,
        }
    }

    /// Build a snapshot from row-major cells, recovering the body order by
    /// following arrows back from the head
    pub fn from_cells(board_size: usize, cells: Vec<Cell>) -> Result<Self, SnapshotError> {
        let expected = board_size * board_size;
        if cells.len() != expected {
            return Err(SnapshotError::WrongLength {
                found: cells.len(),
                expected,
            });
        }

        let heads: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Head)
            .map(|(index, _)| index)
            .collect();
        if heads.len() != 1 {
            return Err(SnapshotError::HeadCount { found: heads.len() });
        }

        let head = Position::from_index(heads[0], board_size);
        let apple = cells
            .iter()
            .position(|cell| *cell == Cell::Apple)
            .map(|index| Position::from_index(index, board_size));

        let mut snapshot = Self {
            board_size,
            cells,
            head,
            apple,
            body: Vec::new(),
        };
        snapshot.body = snapshot.trace_body();
        Ok(snapshot)
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Row-major squares, `board_size * board_size` of them
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.index(self.board_size)]
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn apple(&self) -> Option<Position> {
        self.apple
    }

    /// Body segments from the neck to the tail, head excluded
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn tail(&self) -> Position {
        self.body.last().copied().unwrap_or(self.head)
    }

    /// Head plus body segments
    pub fn snake_len(&self) -> usize {
        self.body.len() + 1
    }

    /// Per-square distance from the head along the body: `Some(0)` for the
    /// head, `Some(n)` for the n-th segment behind it, `None` elsewhere
    pub fn distances_from_head(&self) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.cells.len()];
        distances[self.head.index(self.board_size)] = Some(0);
        for (n, segment) in self.body.iter().enumerate() {
            distances[segment.index(self.board_size)] = Some(n + 1);
        }
        distances
    }

    /// Walk from the head to the tail by repeatedly finding the neighbour whose
    /// arrow points at the current square
    fn trace_body(&self) -> Vec<Position> {
        let mut visited = vec![false; self.cells.len()];
        visited[self.head.index(self.board_size)] = true;

        let mut body = Vec::new();
        let mut current = self.head;
        while let Some(previous) = self.segment_pointing_at(current, &visited) {
            visited[previous.index(self.board_size)] = true;
            body.push(previous);
            current = previous;
        }
        body
    }

    fn segment_pointing_at(&self, pos: Position, visited: &[bool]) -> Option<Position> {
        // A segment that moved `direction` sits one step against it
        [
            Direction::Down,
            Direction::Up,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .find_map(|direction| {
            let (d_row, d_col) = direction.delta();
            let candidate = pos.moved_by(-d_row, -d_col);
            let points_here = candidate.is_in_bounds(self.board_size)
                && !visited[candidate.index(self.board_size)]
                && self.cell(candidate) == Cell::Body(direction);
            points_here.then_some(candidate)
        })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.board_size) {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let board_size = rows.len();

        let mut cells = Vec::with_capacity(board_size * board_size);
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != board_size {
                return Err(SnapshotError::NotSquare {
                    row,
                    found: symbols.len(),
                    expected: board_size,
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(SnapshotError::UnknownSymbol { symbol, row, col })?;
                cells.push(cell);
            }
        }

        Self::from_cells(board_size, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(Cell::Head.symbol(), 'H');
        assert_eq!(Cell::Body(Direction::Left).symbol(), '←');
        assert_eq!(Cell::from_symbol('X'), Some(Cell::Empty));
        assert_eq!(Cell::from_symbol('↓'), Some(Cell::Body(Direction::Down)));
        assert_eq!(Cell::from_symbol('?'), None);
    }

    #[test]
    fn test_cells_must_fill_the_board() {
        let mut cells = vec![Cell::Empty; 10];
        cells[0] = Cell::Head;
        assert_eq!(
            Snapshot::from_cells(6, cells),
            Err(SnapshotError::WrongLength {
                found: 10,
                expected: 36
            })
        );

        let mut cells = vec![Cell::Empty; 37];
        cells[0] = Cell::Head;
        assert!(matches!(
            Snapshot::from_cells(6, cells),
            Err(SnapshotError::WrongLength { found: 37, .. })
        ));
    }

    #[test]
    fn test_parse_traces_body_around_corners() {
        let board = "\
            XXXXX\n\
            X→→↓X\n\
            XXAHX\n\
            XXXXX\n\
            XXXXX\n";
        let snapshot: Snapshot = board.parse().unwrap();

        assert_eq!(snapshot.board_size(), 5);
        assert_eq!(snapshot.head(), Position::new(2, 3));
        assert_eq!(snapshot.apple(), Some(Position::new(2, 2)));
        assert_eq!(
            snapshot.body(),
            &[
                Position::new(1, 3),
                Position::new(1, 2),
                Position::new(1, 1)
            ]
        );
        assert_eq!(snapshot.tail(), Position::new(1, 1));
        assert_eq!(snapshot.snake_len(), 4);

        let distances = snapshot.distances_from_head();
        assert_eq!(distances[Position::new(2, 3).index(5)], Some(0));
        assert_eq!(distances[Position::new(1, 1).index(5)], Some(3));
        assert_eq!(distances[Position::new(0, 0).index(5)], None);
    }

    #[test]
    fn test_display_round_trip() {
        let board = "XXXXX\nX→→HX\nXXXXX\nXXXAX\nXXXXX\n";
        let snapshot: Snapshot = board.parse().unwrap();
        assert_eq!(snapshot.to_string(), board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XX\nX".parse::<Snapshot>(),
            Err(SnapshotError::NotSquare {
                row: 1,
                found: 1,
                expected: 2
            })
        );
        assert_eq!(
            "XX\nXQ".parse::<Snapshot>(),
            Err(SnapshotError::UnknownSymbol {
                symbol: 'Q',
                row: 1,
                col: 1
            })
        );
        assert_eq!(
            "XX\nXX".parse::<Snapshot>(),
            Err(SnapshotError::HeadCount { found: 0 })
        );
    }

    #[test]
    fn test_stray_arrow_not_counted_as_body() {
        // The arrow at (0, 0) points away from the snake
        let snapshot: Snapshot = "←XXXX\nXXXXX\nX→HXX\nXXXXX\nXXXXA\n".parse().unwrap();
        assert_eq!(snapshot.body(), &[Position::new(2, 1)]);
    }
}
