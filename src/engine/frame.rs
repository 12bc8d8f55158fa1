//! Frame-coalescing latch: schedule at most one pending recomputation per
//! tick, overwriting any unconsumed input. High-frequency pointer events set
//! the latch; the per-frame pass takes it once.

#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameCoalescer<T> {
    /// Replace whatever input is pending; only the newest survives.
    pub fn set(&mut self, input: T) {
        self.pending = Some(input);
    }

    /// Consume the pending input, if any. Called once per frame.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_input_wins_and_take_drains() {
        let mut latch = FrameCoalescer::default();
        latch.set(1);
        latch.set(2);
        latch.set(3);

        assert_eq!(latch.take(), Some(3));
        assert_eq!(latch.take(), None);

        latch.set(4);
        latch.clear();
        assert_eq!(latch.take(), None);
    }
}
