use heapless::Deque;

use super::{InputEvent, InputProvider};

/// Queue-backed input source for bring-up and host builds.
#[derive(Debug, Clone, Default)]
pub struct MockInput<const N: usize> {
    queue: Deque<InputEvent, N>,
}

impl<const N: usize> MockInput<N> {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
        }
    }

    /// Queues an event. Returns it back when the queue is full.
    pub fn push(&mut self, event: InputEvent) -> Result<(), InputEvent> {
        self.queue.push_back(event)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl<const N: usize> InputProvider for MockInput<N> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.queue.pop_front())
    }
}
