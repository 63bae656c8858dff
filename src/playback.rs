//! Step-by-step replay of a precomputed trace.
//!
//! `position` counts how many steps have been revealed: 0 means nothing has
//! been shown yet and `len()` means the replay is finished. Moving past
//! either end is a no-op, so a front end can bind buttons straight to
//! `next`/`prev` without bounds checks.

#[derive(Debug, Clone, PartialEq)]
pub struct Playback<T> {
    steps: Vec<T>,
    position: usize,
}

impl<T> Default for Playback<T> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl<T> Playback<T> {
    pub fn new(steps: Vec<T>) -> Self {
        Self { steps, position: 0 }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.steps.len()
    }

    pub fn revealed(&self) -> &[T] {
        &self.steps[..self.position]
    }

    /// Most recently revealed step.
    pub fn current(&self) -> Option<&T> {
        self.revealed().last()
    }

    pub fn next(&mut self) -> Option<&T> {
        if self.is_finished() {
            return None;
        }
        self.position += 1;
        self.current()
    }

    pub fn prev(&mut self) -> Option<&T> {
        self.position = self.position.saturating_sub(1);
        self.current()
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn finish(&mut self) {
        self.position = self.steps.len();
    }
}
