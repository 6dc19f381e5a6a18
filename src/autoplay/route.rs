//! Covering cycle over the board and the forward edges derived from it
//!
//! The cycle starts at the top-left corner, snakes through rows `1..n` column
//! by column (down on even columns, up on odd ones) and returns along row 0.
//! That only closes up when the board side is even.
//!
//! ```text
//! 6x6 board, sequence numbers:
//!  0 35 34 33 32 31
//!  1 10 11 20 21 30
//!  2  9 12 19 22 29
//!  3  8 13 18 23 28
//!  4  7 14 17 24 27
//!  5  6 15 16 25 26
//! ```

use crate::game::{Direction, GameError, Position};

/// One square of the cycle and the squares it may hop to next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNode {
    sequence: usize,
    /// Forward neighbours, longest hop first
    edges: Vec<usize>,
}

impl RouteNode {
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Sequence numbers reachable in one move, longest hop first
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }
}

#[derive(Debug, Clone)]
pub struct RouteGraph {
    board_size: usize,
    /// Row-major square index to sequence number
    sequence_of: Vec<usize>,
    /// Sequence number to square
    position_of: Vec<Position>,
    nodes: Vec<RouteNode>,
}

impl RouteGraph {
    pub fn new(board_size: usize) -> Result<Self, GameError> {
        if board_size % 2 != 0 || board_size == 0 {
            return Err(GameError::OddBoard { size: board_size });
        }

        let position_of = sweep(board_size);
        let mut sequence_of = vec![0; board_size * board_size];
        for (sequence, pos) in position_of.iter().enumerate() {
            sequence_of[pos.index(board_size)] = sequence;
        }

        let mut graph = Self {
            board_size,
            sequence_of,
            position_of,
            nodes: Vec::new(),
        };
        graph.nodes = (0..graph.len()).map(|seq| graph.build_node(seq)).collect();

        Ok(graph)
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of squares on the cycle
    pub fn len(&self) -> usize {
        self.position_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_of.is_empty()
    }

    pub fn last_sequence(&self) -> usize {
        self.len() - 1
    }

    pub fn sequence_of(&self, pos: Position) -> usize {
        self.sequence_of[pos.index(self.board_size)]
    }

    pub fn position_of(&self, sequence: usize) -> Position {
        self.position_of[sequence]
    }

    pub fn node(&self, sequence: usize) -> &RouteNode {
        &self.nodes[sequence]
    }

    /// Forward edges of `sequence`, longest hop first
    pub fn edges(&self, sequence: usize) -> &[usize] {
        self.nodes[sequence].edges()
    }

    /// Next sequence number along the plain cycle
    pub fn successor(&self, sequence: usize) -> usize {
        (sequence + 1) % self.len()
    }

    /// True when `to` lies ahead of `from` on the cycle; the wrap from the last
    /// square back to 0 counts as forward, the reverse does not
    pub fn is_forward(&self, from: usize, to: usize) -> bool {
        let last = self.last_sequence();
        if from == last && to == 0 {
            return true;
        }
        if from == 0 && to == last {
            return false;
        }
        from < to
    }

    /// How far along the cycle a forward hop travels
    pub fn hop_distance(&self, from: usize, to: usize) -> usize {
        if from == self.last_sequence() && to == 0 {
            return 1;
        }
        to - from
    }

    /// Direction of the single move between two adjacent sequence numbers
    pub fn direction_between(&self, from: usize, to: usize) -> Option<Direction> {
        self.position_of(from).direction_to(self.position_of(to))
    }

    fn build_node(&self, sequence: usize) -> RouteNode {
        let pos = self.position_of(sequence);
        let mut edges: Vec<usize> = [
            Direction::Right,
            Direction::Left,
            Direction::Down,
            Direction::Up,
        ]
        .into_iter()
        .map(|direction| pos.moved_in_direction(direction))
        .filter(|next| next.is_in_bounds(self.board_size))
        .map(|next| self.sequence_of(next))
        .filter(|&next| self.is_forward(sequence, next))
        .collect();

        edges.sort_by_key(|&next| std::cmp::Reverse(self.hop_distance(sequence, next)));

        RouteNode { sequence, edges }
    }
}

/// Squares in cycle order for an even board
fn sweep(board_size: usize) -> Vec<Position> {
    let size = board_size as i32;
    let mut order = Vec::with_capacity(board_size * board_size);
    order.push(Position::new(0, 0));

    for col in 0..size {
        if col % 2 == 0 {
            order.extend((1..size).map(|row| Position::new(row, col)));
        } else {
            order.extend((1..size).rev().map(|row| Position::new(row, col)));
        }
    }
    order.extend((1..size).rev().map(|col| Position::new(0, col)));

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn adjacent(a: Position, b: Position) -> bool {
        a.direction_to(b).is_some()
    }

    #[test]
    fn test_odd_board_rejected() {
        assert_eq!(
            RouteGraph::new(7).unwrap_err(),
            GameError::OddBoard { size: 7 }
        );
    }

    #[test]
    fn test_six_by_six_layout() {
        let graph = RouteGraph::new(6).unwrap();
        assert_eq!(graph.sequence_of(Position::new(0, 0)), 0);
        assert_eq!(graph.sequence_of(Position::new(5, 0)), 5);
        assert_eq!(graph.sequence_of(Position::new(5, 1)), 6);
        assert_eq!(graph.sequence_of(Position::new(1, 1)), 10);
        assert_eq!(graph.sequence_of(Position::new(1, 5)), 30);
        assert_eq!(graph.sequence_of(Position::new(0, 5)), 31);
        assert_eq!(graph.sequence_of(Position::new(0, 1)), 35);
    }

    #[test]
    fn test_cycle_is_hamiltonian() {
        for size in [6, 8, 10, 12, 20] {
            let graph = RouteGraph::new(size).unwrap();
            let cells = size * size;
            assert_eq!(graph.len(), cells);

            let seen: HashSet<Position> = (0..cells).map(|seq| graph.position_of(seq)).collect();
            assert_eq!(seen.len(), cells);

            for seq in 0..cells {
                let pos = graph.position_of(seq);
                assert!(pos.is_in_bounds(size));
                assert_eq!(graph.sequence_of(pos), seq);
                let next = graph.position_of(graph.successor(seq));
                assert!(adjacent(pos, next), "{:?} -> {:?} on {}x{}", pos, next, size, size);
            }
        }
    }

    #[test]
    fn test_every_node_reaches_its_successor() {
        for size in [6, 8, 10] {
            let graph = RouteGraph::new(size).unwrap();
            for seq in 0..graph.len() {
                let node = graph.node(seq);
                assert_eq!(node.sequence(), seq);
                assert!(node.edges().contains(&graph.successor(seq)));
            }
        }
    }

    #[test]
    fn test_edges_move_forward_longest_first() {
        let graph = RouteGraph::new(8).unwrap();
        let last = graph.last_sequence();
        for seq in 0..graph.len() {
            let edges = graph.node(seq).edges();
            for &next in edges {
                if seq == last {
                    assert_eq!(next, 0);
                } else {
                    assert!(next > seq);
                }
            }
            for pair in edges.windows(2) {
                assert!(graph.hop_distance(seq, pair[0]) >= graph.hop_distance(seq, pair[1]));
            }
        }
    }

    #[test]
    fn test_shortcuts_exist() {
        let graph = RouteGraph::new(6).unwrap();
        // (4,1) = 7 can step right onto (4,2) = 14 instead of up to 8
        assert_eq!(graph.node(7).edges(), &[14, 8]);
        assert_eq!(graph.direction_between(7, 14), Some(Direction::Right));

        // (1,1) = 10 can jump straight onto the return row at (0,1) = 35
        assert_eq!(graph.edges(10), &[35, 11]);
    }

    #[test]
    fn test_wraparound_edge() {
        let graph = RouteGraph::new(6).unwrap();
        assert!(graph.is_forward(35, 0));
        assert!(!graph.is_forward(0, 35));
        assert_eq!(graph.hop_distance(35, 0), 1);
        assert_eq!(graph.node(35).edges(), &[0]);
    }
}
