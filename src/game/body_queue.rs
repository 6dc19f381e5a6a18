//! FIFO of body segment positions backed by two fixed buffers.
//!
//! Enqueues fill the write half from the back; dequeues drain the read half from
//! the back as well, which yields insertion order. When the read half runs dry
//! the halves trade places, so nothing is ever shifted or reallocated.

use super::state::Position;

#[derive(Debug, Clone)]
pub struct BodySegmentQueue {
    halves: [Box<[Position]>; 2],
    /// Segments written into each half
    filled: [usize; 2],
    /// Segments already read out of each half
    consumed: [usize; 2],
    /// Index of the half currently being read
    reading: usize,
}

impl BodySegmentQueue {
    /// Both halves hold `capacity` segments; use the board cell count
    pub fn new(capacity: usize) -> Self {
        Self {
            halves: [
                vec![Position::default(); capacity].into_boxed_slice(),
                vec![Position::default(); capacity].into_boxed_slice(),
            ],
            filled: [0, 0],
            consumed: [0, 0],
            reading: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.halves[0].len()
    }

    /// Add a segment at the logical tail of the queue
    pub fn enqueue(&mut self, segment: Position) {
        let writing = 1 - self.reading;
        let slot = self.slot(self.filled[writing]);
        self.halves[writing][slot] = segment;
        self.filled[writing] += 1;
    }

    /// Remove the oldest segment, or `None` when the queue is empty
    pub fn dequeue(&mut self) -> Option<Position> {
        if self.consumed[self.reading] == self.filled[self.reading] {
            self.filled[self.reading] = 0;
            self.consumed[self.reading] = 0;
            self.reading = 1 - self.reading;

            if self.consumed[self.reading] == self.filled[self.reading] {
                return None;
            }
        }

        let slot = self.slot(self.consumed[self.reading]);
        self.consumed[self.reading] += 1;
        Some(self.halves[self.reading][slot])
    }

    pub fn len(&self) -> usize {
        let writing = 1 - self.reading;
        self.filled[self.reading] - self.consumed[self.reading] + self.filled[writing]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Segments from oldest to newest without consuming them
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let writing = 1 - self.reading;
        let unread = (self.consumed[self.reading]..self.filled[self.reading])
            .map(move |n| self.halves[self.reading][self.slot(n)]);
        let written = (0..self.filled[writing]).map(move |n| self.halves[writing][self.slot(n)]);
        unread.chain(written)
    }

    /// The n-th segment written to a half lives n slots from the back
    fn slot(&self, n: usize) -> usize {
        self.capacity() - 1 - n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(n: i32) -> Position {
        Position::new(n, n)
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = BodySegmentQueue::new(4);
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
        // Swapping halves on an empty queue must not corrupt it
        assert_eq!(queue.dequeue(), None);
        queue.enqueue(pos(1));
        assert_eq!(queue.dequeue(), Some(pos(1)));
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = BodySegmentQueue::new(8);
        for n in 0..5 {
            queue.enqueue(pos(n));
        }
        assert_eq!(queue.len(), 5);
        for n in 0..5 {
            assert_eq!(queue.dequeue(), Some(pos(n)));
        }
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_interleaved_operations_keep_fifo() {
        // Simulates a moving snake: each step drops the tail and pushes the old head
        let mut queue = BodySegmentQueue::new(9);
        let mut expected = std::collections::VecDeque::new();
        let mut next = 0;

        for _ in 0..3 {
            queue.enqueue(pos(next));
            expected.push_back(pos(next));
            next += 1;
        }

        for step in 0..50 {
            if step % 7 != 0 {
                assert_eq!(queue.dequeue(), expected.pop_front());
            }
            queue.enqueue(pos(next));
            expected.push_back(pos(next));
            next += 1;
            assert_eq!(queue.len(), expected.len());
            if expected.len() >= 8 {
                break;
            }
        }

        while let Some(segment) = expected.pop_front() {
            assert_eq!(queue.dequeue(), Some(segment));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_iter_matches_dequeue_order() {
        let mut queue = BodySegmentQueue::new(6);
        for n in 0..4 {
            queue.enqueue(pos(n));
        }
        queue.dequeue();
        queue.enqueue(pos(4));
        queue.enqueue(pos(5));

        let seen: Vec<Position> = queue.iter().collect();
        assert_eq!(seen, vec![pos(1), pos(2), pos(3), pos(4), pos(5)]);

        let mut drained = Vec::new();
        while let Some(segment) = queue.dequeue() {
            drained.push(segment);
        }
        assert_eq!(drained, seen);
    }
}
