// src/cli/queue.rs

use std::collections::VecDeque;

/// Ordered list of pending command lines, drained from the front.
///
/// The queue is the only channel through which a handler can make further
/// commands execute: compound operations (`home`, `reset`, corrected typos)
/// are expressed purely as front-insertions. Ownership follows the active
/// menu; a sub-menu receives the queue by value and hands the residue back
/// when it exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
    inner: VecDeque<String>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a queue from lines in execution order.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Removes and returns the next line to execute.
    pub fn pop_front(&mut self) -> Option<String> {
        self.inner.pop_front()
    }

    /// Schedules a line to execute before everything currently queued.
    pub fn push_front(&mut self, line: impl Into<String>) {
        self.inner.push_front(line.into());
    }

    /// Schedules a line after everything currently queued.
    pub fn push_back(&mut self, line: impl Into<String>) {
        self.inner.push_back(line.into());
    }

    /// Schedules a batch before everything currently queued, preserving the
    /// batch's own order: after `prepend(["a", "b"])` the queue starts
    /// `a, b, ...`.
    pub fn prepend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        for line in lines.into_iter().rev() {
            self.inner.push_front(line.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    pub fn into_lines(self) -> Vec<String> {
        self.inner.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_fifo_order() {
        let mut queue = CommandQueue::from_lines(["a", "b", "c"]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_front().as_deref(), Some("a"));
        assert_eq!(queue.pop_front().as_deref(), Some("b"));
        assert_eq!(queue.pop_front().as_deref(), Some("c"));
        assert!(queue.pop_front().is_none());
    }

    #[test]
    fn prepend_preserves_relative_order() {
        let mut queue = CommandQueue::from_lines(["tail"]);
        queue.prepend(["first", "second"]);
        assert_eq!(
            queue.into_lines(),
            vec!["first".to_string(), "second".into(), "tail".into()]
        );
    }

    #[test]
    fn push_front_jumps_the_line() {
        let mut queue = CommandQueue::from_lines(["b"]);
        queue.push_front("a");
        queue.push_back("c");
        assert_eq!(
            queue.into_lines(),
            vec!["a".to_string(), "b".into(), "c".into()]
        );
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = CommandQueue::from_lines(["a", "b"]);
        queue.clear();
        assert!(queue.is_empty());
    }
}
