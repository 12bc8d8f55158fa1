//! Exclusive interaction lock: the capability seam standing in for platform
//! pointer capture. A single nullable holder; a second pointer is refused
//! while the first holds the lock.

pub type PointerId = u64;

#[derive(Debug, Default)]
pub struct InteractionLock {
    holder: Option<PointerId>,
}

impl InteractionLock {
    pub fn acquire(&mut self, pointer_id: PointerId) -> bool {
        match self.holder {
            None => {
                self.holder = Some(pointer_id);
                true
            }
            Some(held) => held == pointer_id,
        }
    }

    /// Releasing is a no-op unless `pointer_id` actually holds the lock.
    pub fn release(&mut self, pointer_id: PointerId) {
        if self.holder == Some(pointer_id) {
            self.holder = None;
        }
    }

    pub fn is_held_by(&self, pointer_id: PointerId) -> bool {
        self.holder == Some(pointer_id)
    }

    pub fn is_held(&self) -> bool {
        self.holder.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_pointer_is_refused_while_held() {
        let mut lock = InteractionLock::default();
        assert!(lock.acquire(1));
        assert!(!lock.acquire(2));
        assert!(lock.acquire(1), "re-acquire by the holder is fine");

        lock.release(2);
        assert!(lock.is_held_by(1), "release by a non-holder is ignored");

        lock.release(1);
        assert!(!lock.is_held());
        assert!(lock.acquire(2));
    }
}
