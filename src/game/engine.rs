use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Direction,
    apple_pool::ApplePositionPool,
    body_queue::BodySegmentQueue,
    config::GameConfig,
    error::GameError,
    snapshot::Snapshot,
    state::{Cell, Position, Status},
};

/// The game engine: owns the board, the snake's body queue, the apple pool and
/// the session's random source
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    board_size: usize,
    cells: Vec<Cell>,
    body: BodySegmentQueue,
    apples: ApplePositionPool,
    head: Position,
    apple: Option<Position>,
    /// Apples left to eat before the board is full
    remaining_growth: usize,
    status: Status,
    score: u32,
    steps: u32,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game; invalid configurations are rejected up front
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        config.validate()?;
        Ok(Self::lay_out(config, rng))
    }

    /// Build the opening position for an already validated configuration
    fn lay_out(config: GameConfig, rng: StdRng) -> Self {
        let board_size = config.board_size;
        let cell_count = board_size * board_size;
        let middle = ((board_size - 1) / 2) as i32;
        let head = Position::new(middle, middle);

        let mut cells = vec![Cell::Empty; cell_count];
        cells[head.index(board_size)] = Cell::Head;

        // Tail first, so the queue hands segments back in tail-to-neck order
        let mut body = BodySegmentQueue::new(cell_count);
        for offset in (1..=config.initial_body_length as i32).rev() {
            let segment = Position::new(middle, middle - offset);
            cells[segment.index(board_size)] = Cell::Body(Direction::Right);
            body.enqueue(segment);
        }

        let apples = ApplePositionPool::new(board_size, |pos| {
            cells[pos.index(board_size)] == Cell::Empty
        });

        let mut engine = Self {
            remaining_growth: cell_count - config.initial_body_length - 1,
            config,
            board_size,
            cells,
            body,
            apples,
            head,
            apple: None,
            status: Status::Continue,
            score: 0,
            steps: 0,
            rng,
        };
        engine.spawn_apple();

        engine
    }

    /// Start over with the same configuration; the random source keeps running
    pub fn reset(&mut self) {
        *self = Self::lay_out(self.config.clone(), self.rng.clone());
    }

    /// Advance the game one step in `direction`
    pub fn tick(&mut self, direction: Direction) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }

        let target = self.head.moved_in_direction(direction);
        if !target.is_in_bounds(self.board_size) {
            debug!("head left the board at {:?}", target);
            return self.finish(Status::Loss);
        }

        self.steps += 1;
        match self.cells[target.index(self.board_size)] {
            Cell::Body(_) => {
                debug!("head ran into the body at {:?}", target);
                self.finish(Status::Loss)
            }
            Cell::Apple => {
                self.advance_head(target, direction);
                self.apple = None;
                self.score += 1;
                self.remaining_growth -= 1;
                if self.remaining_growth == 0 {
                    debug!("board filled after {} steps", self.steps);
                    return self.finish(Status::Win);
                }
                self.spawn_apple();
                Status::Continue
            }
            Cell::Empty => {
                let Some(tail) = self.body.dequeue() else {
                    return self.finish(Status::Win);
                };
                self.cells[tail.index(self.board_size)] = Cell::Empty;
                self.advance_head(target, direction);
                self.apples.swap_occupancy(tail, target);
                Status::Continue
            }
            Cell::Head => Status::Continue,
        }
    }

    /// Owned copy of the board for the autoplayer and renderers
    pub fn snapshot(&self) -> Snapshot {
        let mut body: Vec<Position> = self.body.iter().collect();
        body.reverse();
        Snapshot::from_parts(
            self.board_size,
            self.cells.clone(),
            self.head,
            self.apple,
            body,
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board_size(&self) -> usize {
        self.board_size
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

    /// Number of body segments behind the head
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn remaining_growth(&self) -> usize {
        self.remaining_growth
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// True until the game is won or lost
    pub fn is_running(&self) -> bool {
        self.status == Status::Continue
    }

    /// Apples eaten so far
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Vacant squares an apple could spawn on
    pub fn vacant_count(&self) -> usize {
        self.apples.len()
    }

    /// Move the head onto `target`, leaving a body segment behind
    fn advance_head(&mut self, target: Position, direction: Direction) {
        let old_head = self.head;
        self.cells[old_head.index(self.board_size)] = Cell::Body(direction);
        self.body.enqueue(old_head);
        self.cells[target.index(self.board_size)] = Cell::Head;
        self.head = target;
    }

    fn spawn_apple(&mut self) {
        if let Some(pos) = self.apples.pick(&mut self.rng) {
            self.apples.remove(pos);
            self.cells[pos.index(self.board_size)] = Cell::Apple;
            self.apple = Some(pos);
        }
    }

    fn finish(&mut self, status: Status) -> Status {
        self.status = status;
        status
    }

    /// Move the apple to a chosen vacant square
    #[cfg(test)]
    pub(crate) fn place_apple(&mut self, pos: Position) {
        if let Some(old) = self.apple.take() {
            self.cells[old.index(self.board_size)] = Cell::Empty;
            self.apples.insert(old);
        }
        self.apples.remove(pos);
        self.cells[pos.index(self.board_size)] = Cell::Apple;
        self.apple = Some(pos);
    }

    #[cfg(test)]
    pub(crate) fn body_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Body(_)))
            .count()
    }
}
