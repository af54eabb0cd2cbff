//! Single-threaded cooperative task queue.

use std::collections::VecDeque;

use crate::dom::ArenaDom;

/// The environment displaying the document.
///
/// The engine hands control back to the host between tasks so that whatever
/// the previous task put on screen (the wait indicator) is painted before the
/// next task blocks.
pub trait Host {
    fn render(&mut self, dom: &ArenaDom);
}

/// A host with nothing to paint, for offline runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl Host for NoopHost {
    fn render(&mut self, _dom: &ArenaDom) {}
}

/// FIFO of pending tasks. Tasks run to completion; there is no cancellation.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: VecDeque<T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: T) {
        self.queue.push_back(task);
    }

    /// Take the next task to run.
    pub fn next_task(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
