use log::{debug, warn};

use super::route::RouteGraph;
use crate::game::{Direction, GameEngine, GameError, Snapshot, Status};

/// What the autoplayer chose to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// An edge passed every safety check
    Planned(Direction),
    /// Nothing passed; heading for the plain cycle successor unverified
    Fallback(Direction),
}

impl Decision {
    pub fn direction(&self) -> Direction {
        match self {
            Decision::Planned(direction) | Decision::Fallback(direction) => *direction,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback(_))
    }
}

/// Why an edge was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Target square holds a body segment
    Body,
    /// The snake is too long to get back round to the head's square
    ReturnCost,
    /// The hop would jump over the apple
    SkipsApple,
    /// Cycle squares between head and target hold a body segment
    CrossesBody,
    /// A shortcut would leave too little free track in front of the tail
    TailClearance,
    /// Target is not one of the head's forward edges
    NotAnEdge,
    /// Snapshot is for a different board size than the route
    BoardMismatch,
}

/// Result of letting the autoplayer drive one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub decision: Decision,
    pub status: Status,
}

/// Per-tick facts about the board, expressed in cycle sequence numbers
struct BoardView {
    /// Distance from the head along the body, per row-major square
    distances: Vec<Option<usize>>,
    head: usize,
    apple: Option<usize>,
    tail: usize,
    snake_len: usize,
}

/// Picks moves by following the covering cycle and taking the longest safe shortcut.
///
/// Holds nothing but the route graph, so one player can drive any number of
/// games on boards of the same size.
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    graph: RouteGraph,
}

impl AutoPlayer {
    /// Fails with [`GameError::OddBoard`] for boards the cycle cannot cover
    pub fn new(board_size: usize) -> Result<Self, GameError> {
        Ok(Self {
            graph: RouteGraph::new(board_size)?,
        })
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// Choose a direction for the position in `snapshot`; the snapshot must
    /// come from a board of the size this player was built for
    pub fn decide(&self, snapshot: &Snapshot) -> Result<Decision, GameError> {
        self.ensure_board_size(snapshot.board_size())?;
        let view = self.view(snapshot);
        let node = self.graph.node(view.head);

        for &target in node.edges() {
            if self.check_edge_in(&view, target).is_err() {
                continue;
            }
            if let Some(direction) = self.graph.direction_between(view.head, target) {
                debug!("head {} -> {} ({:?})", view.head, target, direction);
                return Ok(Decision::Planned(direction));
            }
        }

        let successor = self.graph.successor(view.head);
        let direction = self
            .graph
            .direction_between(view.head, successor)
            .unwrap_or(Direction::Right);
        warn!(
            "no safe move from sequence {} (snake length {}), following the cycle",
            view.head, view.snake_len
        );
        Ok(Decision::Fallback(direction))
    }

    /// Run every safety check for a hop from the head onto `target`
    pub fn check_edge(&self, snapshot: &Snapshot, target: usize) -> Result<(), Rejection> {
        if self.ensure_board_size(snapshot.board_size()).is_err() {
            return Err(Rejection::BoardMismatch);
        }
        let view = self.view(snapshot);
        if !self.graph.node(view.head).edges().contains(&target) {
            return Err(Rejection::NotAnEdge);
        }
        self.check_edge_in(&view, target)
    }

    /// Decide, then apply the move to the engine
    pub fn play_turn(&self, engine: &mut GameEngine) -> Result<Turn, GameError> {
        let decision = self.decide(&engine.snapshot())?;
        let status = engine.tick(decision.direction());
        Ok(Turn { decision, status })
    }

    fn ensure_board_size(&self, found: usize) -> Result<(), GameError> {
        let expected = self.graph.board_size();
        if found != expected {
            return Err(GameError::BoardSizeMismatch { expected, found });
        }
        Ok(())
    }

    fn view(&self, snapshot: &Snapshot) -> BoardView {
        BoardView {
            distances: snapshot.distances_from_head(),
            head: self.graph.sequence_of(snapshot.head()),
            apple: snapshot.apple().map(|pos| self.graph.sequence_of(pos)),
            tail: self.graph.sequence_of(snapshot.tail()),
            snake_len: snapshot.snake_len(),
        }
    }

    fn is_body(&self, view: &BoardView, sequence: usize) -> bool {
        let pos = self.graph.position_of(sequence);
        matches!(view.distances[pos.index(self.graph.board_size())], Some(d) if d > 0)
    }

    fn check_edge_in(&self, view: &BoardView, target: usize) -> Result<(), Rejection> {
        let cells = self.graph.len();
        let node = view.head;

        if self.is_body(view, target) {
            return Err(Rejection::Body);
        }

        if view.snake_len < cells - 1 {
            let return_cost = (cells - target) + node;
            if return_cost <= view.snake_len {
                return Err(Rejection::ReturnCost);
            }
        }

        if let Some(apple) = view.apple {
            if node < apple && apple < target {
                return Err(Rejection::SkipsApple);
            }
        }

        if (node..target).any(|sequence| self.is_body(view, sequence)) {
            return Err(Rejection::CrossesBody);
        }

        if target != self.graph.successor(node) && !self.has_tail_clearance(view, target) {
            return Err(Rejection::TailClearance);
        }

        Ok(())
    }

    /// After hopping onto `target`, the free track between it and the tail must
    /// outlast the holes the hop leaves in the body plus the snake's length
    fn has_tail_clearance(&self, view: &BoardView, target: usize) -> bool {
        let cells = self.graph.len() as isize;
        let span = ((target + self.graph.len() - view.tail) % self.graph.len()) as isize + 1;
        let eats = usize::from(view.apple == Some(target));
        let length_after = (view.snake_len + eats) as isize;

        let holes = span - length_after;
        let free = cells - span;
        free > holes + view.snake_len as isize
    }
}
