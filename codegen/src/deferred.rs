//! FIFO queue of text fragments whose output is postponed until the next
//! flushing write.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    fragments: VecDeque<String>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push_back(fragment.into());
    }

    /// Removes every fragment, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = String> + '_ {
        self.fragments.drain(..)
    }

    /// Returns the first fragment and blanks it in place. Repeated calls
    /// return `Some("")` until the fragment is removed.
    pub fn replay_first(&mut self) -> Option<String> {
        self.fragments.front_mut().map(std::mem::take)
    }

    /// Removes and returns the first fragment, promoting the next one.
    pub fn pop_first(&mut self) -> Option<String> {
        self.fragments.pop_front()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_is_fifo() {
        let mut queue = DeferredQueue::new();
        queue.push(")");
        queue.push(" {\n");

        let drained: Vec<String> = queue.drain().collect();
        assert_eq!(drained, vec![")".to_string(), " {\n".to_string()]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_replay_first_blanks_in_place() {
        let mut queue = DeferredQueue::new();
        queue.push(")");
        queue.push(" {");

        assert_eq!(queue.replay_first().as_deref(), Some(")"));
        assert_eq!(queue.replay_first().as_deref(), Some(""));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pop_first_promotes_next() {
        let mut queue = DeferredQueue::new();
        queue.push("a");
        queue.push("b");

        assert_eq!(queue.pop_first().as_deref(), Some("a"));
        assert_eq!(queue.pop_first().as_deref(), Some("b"));
        assert_eq!(queue.pop_first(), None);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = DeferredQueue::new();
        assert_eq!(queue.replay_first(), None);
        assert_eq!(queue.pop_first(), None);
        assert_eq!(queue.drain().count(), 0);
    }
}
