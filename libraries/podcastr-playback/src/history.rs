//! Shuffle back-stack
//!
//! Remembers the playlist indices left behind by shuffle draws so that
//! "previous" can retrace them.

use std::collections::VecDeque;

/// Bounded stack of visited playlist indices
///
/// Most recent entry sits at the back. When full, the oldest entry is
/// discarded.
#[derive(Debug, Clone)]
pub struct History {
    indices: VecDeque<usize>,
    max_size: usize,
}

impl History {
    /// Create a back-stack holding at most `max_size` indices
    pub fn new(max_size: usize) -> Self {
        Self {
            indices: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record an index the player is leaving
    pub fn push(&mut self, index: usize) {
        if self.max_size == 0 {
            return;
        }
        if self.indices.len() >= self.max_size {
            self.indices.pop_front();
        }
        self.indices.push_back(index);
    }

    /// Most recent index, without removing it
    pub fn peek(&self) -> Option<usize> {
        self.indices.back().copied()
    }

    /// Remove and return the most recent index
    pub fn pop(&mut self) -> Option<usize> {
        self.indices.pop_back()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change capacity, dropping the oldest entries if it shrinks
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.indices.len() > max_size {
            self.indices.pop_front();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_are_lifo() {
        let mut history = History::new(10);
        history.push(4);
        history.push(1);
        history.push(3);

        assert_eq!(history.peek(), Some(3));
        assert_eq!(history.pop(), Some(3));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), Some(4));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn history_bounded() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(i);
        }

        assert_eq!(history.len(), 3);
        // 0 and 1 were discarded
        assert_eq!(history.pop(), Some(4));
        assert_eq!(history.pop(), Some(3));
        assert_eq!(history.pop(), Some(2));
        assert!(history.is_empty());
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(7);
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn shrink_drops_oldest() {
        let mut history = History::new(5);
        for i in 10..15 {
            history.push(i);
        }

        history.set_max_size(2);
        assert_eq!(history.max_size(), 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(14));
        assert_eq!(history.pop(), Some(13));
    }

    #[test]
    fn clear_history() {
        let mut history = History::default();
        history.push(1);
        history.push(2);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.max_size(), 50);
    }
}
