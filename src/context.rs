use serde::{Deserialize, Serialize};

use crate::cell::Color;

/// The vehicle currently accepting tokens: which color it takes and how many seats are left.
///
/// Its lifecycle belongs to the hosting application; the core only reads the color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtractionQueue {
    /// The color currently eligible for extraction.
    pub color: Color,
    /// Seats left before the queue departs.
    pub remaining: usize,
}

/// The waiting area tokens are parked in when they cannot board.
///
/// Running out of slots ends the hosting game; the core only reports it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct OverflowBuffer {
    /// One entry per slot, holding the color of the parked token if any.
    pub slots: Vec<Option<Color>>,
}

impl OverflowBuffer {
    /// An empty buffer with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: vec![None; capacity] }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a token.
    pub fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Number of empty slots.
    pub fn free(&self) -> usize {
        self.capacity() - self.occupied()
    }

    /// Whether no slot is free.
    pub fn is_full(&self) -> bool {
        self.free() == 0
    }
}

/// State carried from one decision cycle to the next, owned and passed in by the caller.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Index of the level being played.
    pub level: usize,
    /// Moves taken so far on this level.
    pub move_count: usize,
    /// The queue currently accepting tokens.
    pub queue: ExtractionQueue,
    /// The waiting area.
    pub buffer: OverflowBuffer,
}

impl DecisionContext {
    /// Context for the first move of `level`.
    pub fn new(level: usize, queue: ExtractionQueue, buffer: OverflowBuffer) -> Self {
        Self { level, move_count: 0, queue, buffer }
    }

    /// The context after one more move, with queue and buffer as they were; the caller refreshes those from
    /// the hosting application before the next cycle.
    pub fn advanced(&self) -> Self {
        Self { move_count: self.move_count + 1, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::Color;
    use crate::context::{DecisionContext, ExtractionQueue, OverflowBuffer};

    #[test]
    fn buffer_counts() {
        let mut buffer = OverflowBuffer::with_capacity(3);
        assert_eq!((buffer.occupied(), buffer.free(), buffer.is_full()), (0, 3, false));
        buffer.slots = vec![Color::new('R'), None, Color::new('B')];
        assert_eq!((buffer.occupied(), buffer.free(), buffer.is_full()), (2, 1, false));
        assert!(OverflowBuffer::with_capacity(0).is_full());
    }

    #[test]
    fn advancing_counts_moves() {
        let queue = ExtractionQueue { color: Color::new('R').unwrap(), remaining: 3 };
        let context = DecisionContext::new(4, queue, OverflowBuffer::with_capacity(5));
        let next = context.advanced().advanced();
        assert_eq!(next.move_count, 2);
        assert_eq!(next.level, 4);
        assert_eq!(context.move_count, 0);
    }
}
